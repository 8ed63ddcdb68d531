// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：项目配置、提取结果和资源清单
/// - 服务（services）：节点值映射与记录装配等纯业务规则
///
/// 领域层不依赖任何外部实现，体现纯粹的业务逻辑。
pub mod models;
pub mod services;
