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

use crate::engines::traits::SessionError;
use std::time::Duration;

/// 类浏览器的标识请求头
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 静态抓取会话
///
/// 基于reqwest实现的单次HTTP文档抓取，适用于无需登录
/// 和分页的项目。同一个客户端在整个运行内复用，资源收割
/// 沿用它作为出站连接上下文。
pub struct HttpSession {
    client: reqwest::Client,
}

impl HttpSession {
    pub fn new() -> Result<Self, SessionError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }

    /// 抓取页面源码
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 页面源码
    /// * `Err(SessionError)` - 请求失败或非成功状态码
    pub async fn fetch(&self, url: &str) -> Result<String, SessionError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// 本次运行共享的出站HTTP客户端
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}
