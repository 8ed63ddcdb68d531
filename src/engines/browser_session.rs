// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::SessionError;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// 交互式浏览器会话
///
/// 每次提取运行独占一个浏览器句柄，首次需要时创建而不是
/// 构造时创建。句柄必须在每条退出路径上通过 `shutdown`
/// 释放；Drop 只中止CDP事件处理任务作为兜底，浏览器子进程
/// 本身由底层句柄的析构回收。
pub struct BrowserSession {
    browser: Browser,
    handler_task: Option<JoinHandle<()>>,
    page: Page,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl BrowserSession {
    /// 启动一次性浏览器会话
    ///
    /// 配置了远程调试地址时连接已运行的Chrome实例，
    /// 否则在本机启动无头浏览器。
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, SessionError> {
        let (browser, mut handler) = if let Some(url) = &settings.remote_debugging_url {
            info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url).await.map_err(|e| {
                SessionError::Browser(format!("failed to connect to remote Chrome: {}", e))
            })?
        } else {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .arg("--headless=new")
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .request_timeout(Duration::from_secs(30))
                .build()
                .map_err(SessionError::Browser)?;
            Browser::launch(config)
                .await
                .map_err(|e| SessionError::Browser(e.to_string()))?
        };

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(SessionError::Browser(e.to_string()));
            }
        };

        debug!("Browser session started");
        Ok(Self {
            browser,
            handler_task: Some(handler_task),
            page,
            wait_timeout: settings.wait_timeout(),
            poll_interval: settings.poll_interval(),
        })
    }

    /// 导航到URL并等待加载完成
    pub async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?;
        let _ = self.page.wait_for_navigation().await;
        Ok(())
    }

    /// 当前页面源码
    pub async fn content(&self) -> Result<String, SessionError> {
        self.page
            .content()
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))
    }

    /// 立即探测元素
    ///
    /// 不等待；元素不存在时返回 `NotFound`，与等待超时区分。
    pub async fn find(&self, locator: &str) -> Result<Element, SessionError> {
        self.page
            .find_element(locator)
            .await
            .map_err(|_| SessionError::NotFound(locator.to_string()))
    }

    /// 在控件中填入值
    pub async fn type_into(&self, locator: &str, value: &str) -> Result<(), SessionError> {
        let element = self.find(locator).await?;
        element
            .type_str(value)
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?;
        Ok(())
    }

    /// 有界等待控件变为可点击
    ///
    /// 按固定间隔轮询，超过等待窗口返回 `WaitTimeout`。
    pub async fn wait_for_clickable(&self, locator: &str) -> Result<Element, SessionError> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            if let Ok(element) = self.page.find_element(locator).await {
                if element.clickable_point().await.is_ok() {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(SessionError::WaitTimeout(locator.to_string()));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// 滚动到元素并点击
    pub async fn scroll_and_click(&self, element: &Element) -> Result<(), SessionError> {
        element
            .scroll_into_view()
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?;
        Ok(())
    }

    /// 等待点击触发的导航完成
    ///
    /// 点击不一定引起导航，失败在这里不是错误。
    pub async fn settle(&self) {
        let _ = self.page.wait_for_navigation().await;
    }

    /// 关闭并释放浏览器句柄
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {}", e);
        }
        if let Some(handle) = self.handler_task.take() {
            handle.abort();
        }
        debug!("Browser session released");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(handle) = self.handler_task.take() {
            handle.abort();
        }
    }
}
