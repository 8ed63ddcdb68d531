// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::Severity;
use thiserror::Error;

/// 提取流程错误类型
///
/// 覆盖一次提取运行中可能出现的全部失败场景，
/// 每个变体对应一个固定的结果严重级别。
#[derive(Error, Debug)]
pub enum ExtractError {
    /// 字段定位表达式缺失或为空
    #[error("locator expression is missing or empty for field '{field}'")]
    FieldLocatorMissing { field: String },

    /// 字段定位表达式语法无效
    #[error("invalid locator '{locator}' for field '{field}': {message}")]
    FieldLocatorInvalid {
        field: String,
        locator: String,
        message: String,
    },

    /// 字段定位表达式没有匹配到任何元素
    #[error("no elements found for the locator '{locator}' of field '{field}'")]
    FieldNoMatch { field: String, locator: String },

    /// 登录流程失败
    #[error("login failed: {0}")]
    LoginFailure(String),

    /// 分页控件在等待窗口内未变为可点击
    #[error("pagination control '{0}' did not become clickable before the wait elapsed")]
    PaginationTimeout(String),

    /// 分页过程中出现意外错误
    #[error("pagination failed: {0}")]
    PaginationUnexpected(String),

    /// 网络请求失败
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// 结果持久化失败
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    /// 单个资源下载失败，不影响整批收割
    #[error("asset download failed for {url}: {message}")]
    AssetDownloadFailure { url: String, message: String },
}

impl ExtractError {
    /// 错误对应的结果严重级别
    ///
    /// 字段级失败和分页等待超时只产生警告；资源下载失败
    /// 不改变运行状态；其余错误都使运行状态升为 Error。
    pub fn severity(&self) -> Severity {
        match self {
            ExtractError::FieldLocatorMissing { .. }
            | ExtractError::FieldNoMatch { .. }
            | ExtractError::PaginationTimeout(_) => Severity::Warning,
            ExtractError::AssetDownloadFailure { .. } => Severity::Success,
            _ => Severity::Error,
        }
    }
}
