// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! extractrs - 周期性网站字段提取系统
//!
//! 按项目配置周期性地抓取目标网站，通过定位表达式提取字段、
//! 遍历分页、收割关联资源，并将结构化结果落盘。

/// 配置管理
pub mod config;
/// 领域模型与提取服务
pub mod domain;
/// 页面会话引擎（静态HTTP与受控浏览器）
pub mod engines;
/// 提取流水线（登录、分页、编排、持久化、收割）
pub mod pipeline;
/// 周期调度
pub mod queue;
/// 工具模块
pub mod utils;
