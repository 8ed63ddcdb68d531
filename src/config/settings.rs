// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::project::ProjectConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含浏览器会话配置和项目定义列表。项目列表由外部
/// 配置加载一次，进程生命周期内只读。
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 浏览器会话配置
    pub browser: BrowserSettings,
    /// 项目配置列表
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

/// 浏览器会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// DOM条件显式等待超时（秒）
    pub wait_timeout_secs: u64,
    /// 等待期间的元素轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 远程调试地址（可选，用于连接已运行的Chrome实例）
    pub remote_debugging_url: Option<String>,
}

impl BrowserSettings {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            wait_timeout_secs: 10,
            poll_interval_ms: 250,
            remote_debugging_url: None,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default browser wait settings
            .set_default("browser.wait_timeout_secs", 10)?
            .set_default("browser.poll_interval_ms", 250)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("EXTRACTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
