// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod harvester;
pub mod login;
pub mod orchestrator;
pub mod pagination;
pub mod persistence;
