// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 项目配置校验错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProjectConfigError {
    #[error("project name must not be empty")]
    EmptyName,

    #[error("project '{0}' is missing a target URL")]
    MissingUrl(String),

    #[error("project '{0}' has no extraction fields configured")]
    NoFields(String),

    #[error("project '{0}' declares duplicate field key '{1}'")]
    DuplicateField(String, String),
}

/// 调度间隔解析错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("unsupported schedule expression '{0}'")]
    Unsupported(String),
}

/// 字段提取规则
///
/// 输出键加一个定位表达式；定位表达式可以匹配零个或多个元素。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// 输出字段名，项目内唯一
    #[serde(alias = "fieldName")]
    pub name: String,
    /// 定位表达式
    pub locator: String,
}

/// 登录凭据
///
/// 目标控件的定位表达式和要填入的值，按声明顺序依次应用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredential {
    /// 控件定位表达式
    #[serde(alias = "name")]
    pub locator: String,
    /// 填入的值
    pub value: String,
}

/// 调度间隔
///
/// 对调度器而言是不透明的间隔描述：可以是分钟数，
/// 也可以是带单位的字符串表达式（"30"、"15m"、"2h"、"45s"）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleSpec {
    Minutes(u64),
    Expression(String),
}

impl ScheduleSpec {
    /// 解析为固定的触发间隔
    ///
    /// 任何无法解析的表达式都返回错误而不是panic，
    /// 调度器据此跳过项目而不中断整批注册。
    pub fn interval(&self) -> Result<Duration, ScheduleError> {
        let unsupported = || match self {
            ScheduleSpec::Minutes(minutes) => ScheduleError::Unsupported(minutes.to_string()),
            ScheduleSpec::Expression(raw) => ScheduleError::Unsupported(raw.trim().to_string()),
        };

        let seconds = match self {
            ScheduleSpec::Minutes(minutes) => minutes.checked_mul(60),
            ScheduleSpec::Expression(raw) => {
                let raw = raw.trim();
                // A bare number keeps the original meaning: minutes
                if let Ok(minutes) = raw.parse::<u64>() {
                    minutes.checked_mul(60)
                } else {
                    // Split on character, not byte, so multi-byte units fail cleanly
                    let (index, unit) = raw.char_indices().last().ok_or_else(unsupported)?;
                    let amount: u64 = raw[..index]
                        .trim()
                        .parse()
                        .map_err(|_| unsupported())?;
                    match unit {
                        's' => Some(amount),
                        'm' => amount.checked_mul(60),
                        'h' => amount.checked_mul(3600),
                        _ => return Err(unsupported()),
                    }
                }
            }
        };

        match seconds {
            Some(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
            _ => Err(unsupported()),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Uploads")
}

/// 项目配置
///
/// 由外部配置加载器产生，进程生命周期内只读。
/// 项目名作为定时任务的身份，在注册表内唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// 项目名
    pub name: String,
    /// 目标URL，可包含页码占位符 `{1}`
    pub url: String,
    /// 分页控件定位表达式（可选）
    #[serde(default, alias = "pageLocator")]
    pub page_locator: Option<String>,
    /// 字段提取规则，按声明顺序执行
    #[serde(alias = "data")]
    pub fields: Vec<FieldSpec>,
    /// 登录页URL（可选）
    #[serde(default, alias = "loginUrl")]
    pub login_url: Option<String>,
    /// 登录凭据，按声明顺序填入
    #[serde(default, alias = "loginData")]
    pub login_data: Vec<LoginCredential>,
    /// 登录提交控件定位表达式（可选）
    #[serde(default, alias = "submitButtonLocator")]
    pub submit_locator: Option<String>,
    /// 输出根目录
    #[serde(default = "default_output_dir", alias = "directoryPath")]
    pub output_dir: PathBuf,
    /// 调度间隔
    #[serde(alias = "intervalMinutes")]
    pub schedule: ScheduleSpec,
}

impl ProjectConfig {
    /// 配置了登录或分页时需要交互式浏览器会话
    pub fn needs_browser(&self) -> bool {
        self.login_url.is_some() || self.page_locator.is_some()
    }

    /// 运行前校验
    ///
    /// 在任何网络或浏览器活动发生之前执行；校验失败的项目
    /// 不允许启动运行。
    pub fn validate(&self) -> Result<(), ProjectConfigError> {
        if self.name.trim().is_empty() {
            return Err(ProjectConfigError::EmptyName);
        }
        if self.url.trim().is_empty() {
            return Err(ProjectConfigError::MissingUrl(self.name.clone()));
        }
        if self.fields.is_empty() {
            return Err(ProjectConfigError::NoFields(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ProjectConfigError::DuplicateField(
                    self.name.clone(),
                    field.name.clone(),
                ));
            }
        }
        Ok(())
    }
}
