// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::asset::HarvestedAsset;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// 结果严重级别
///
/// 状态单调递增：Success < Warning < Error。
/// 一次运行的最终状态是所有阶段观察到的最大严重级别。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Severity {
    /// 运行成功，无诊断信息
    #[default]
    Success,
    /// 部分字段或分页出现可恢复问题
    Warning,
    /// 运行中出现不可恢复错误
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "Success"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// 提取记录
///
/// 一行数据：字段名到映射值的有序映射。同一页上各字段的
/// 匹配数可以不同，匹配数之外的位置不包含该字段的键。
pub type ExtractionRecord = BTreeMap<String, Value>;

/// 提取结果
///
/// 每次运行新建，持久化或丢弃后即为终态。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtractionOutcome {
    /// 最终状态，所有阶段严重级别的最大值
    pub status: Severity,
    /// 诊断信息：字段名或阶段名到消息的映射
    pub diagnostics: BTreeMap<String, String>,
    /// 按页序累积的记录序列
    pub records: Vec<ExtractionRecord>,
    /// 收割后的资源清单
    pub assets: Vec<HarvestedAsset>,
}

impl ExtractionOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// 提升状态，只升不降
    pub fn raise(&mut self, severity: Severity) {
        if severity > self.status {
            self.status = severity;
        }
    }

    /// 记录一条诊断信息并相应提升状态
    pub fn diagnose(
        &mut self,
        key: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) {
        self.diagnostics.insert(key.into(), message.into());
        self.raise(severity);
    }
}
