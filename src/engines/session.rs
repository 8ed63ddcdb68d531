// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::browser_session::BrowserSession;
use crate::engines::http_session::HttpSession;
use crate::engines::traits::SessionError;

/// 页面会话
///
/// 在同一个接口后面暴露两种抓取策略：静态HTTP抓取和
/// 交互式浏览器会话。浏览器句柄在首次需要时才创建，
/// 由当前运行独占，不跨项目共享也不跨运行复用。
pub struct PageSession {
    http: HttpSession,
    browser_settings: BrowserSettings,
    browser: Option<BrowserSession>,
}

impl PageSession {
    pub fn new(browser_settings: BrowserSettings) -> Result<Self, SessionError> {
        Ok(Self {
            http: HttpSession::new()?,
            browser_settings,
            browser: None,
        })
    }

    /// 静态抓取：单次HTTP GET
    pub async fn fetch_static(&self, url: &str) -> Result<String, SessionError> {
        self.http.fetch(url).await
    }

    /// 获取浏览器会话，首次调用时启动
    pub async fn browser(&mut self) -> Result<&BrowserSession, SessionError> {
        match self.browser {
            Some(ref session) => Ok(session),
            None => {
                let session = BrowserSession::launch(&self.browser_settings).await?;
                Ok(self.browser.insert(session))
            }
        }
    }

    /// 本次运行共享的出站HTTP客户端
    pub fn client(&self) -> &reqwest::Client {
        self.http.client()
    }

    /// 释放浏览器句柄（若已创建）
    ///
    /// 编排器在每条退出路径上都会调用。
    pub async fn release(&mut self) {
        if let Some(browser) = self.browser.take() {
            browser.shutdown().await;
        }
    }
}
