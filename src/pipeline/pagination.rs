// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::ExtractionOutcome;
use crate::domain::models::project::ProjectConfig;
use crate::domain::services::record_builder;
use crate::engines::browser_session::BrowserSession;
use crate::engines::session::PageSession;
use crate::engines::traits::SessionError;
use crate::utils::errors::ExtractError;
use tracing::{debug, info};

/// 分页遍历状态
///
/// 遍历是单向状态机：抓取、提取、推进，循环直到终止。
/// 状态不回退，终止后不可重入。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    /// 读取当前页源码
    Fetching,
    /// 从当前页装配记录
    Extracting,
    /// 探测并点击分页控件
    Advancing,
    /// 遍历结束
    Done,
}

/// 替换URL中的页码占位符
fn page_url(url: &str, page: usize) -> String {
    url.replace("{1}", &page.to_string())
}

/// 遍历项目的全部页面并装配记录
///
/// 无需浏览器的项目走单次静态抓取。配置了分页控件的项目
/// 在浏览器会话内逐页推进：控件不存在说明已到最后一页，
/// 静默结束；控件存在但在等待窗口内未变为可点击按警告结束；
/// 其余推进失败按错误结束。已提取的页面在任何终止路径下
/// 都保留在结果中。
pub async fn walk(
    session: &mut PageSession,
    project: &ProjectConfig,
    outcome: &mut ExtractionOutcome,
) {
    if !project.needs_browser() {
        match session.fetch_static(&page_url(&project.url, 1)).await {
            Ok(html) => {
                let records = record_builder::extract_page(&html, &project.fields, 1, false, outcome);
                outcome.records.extend(records);
            }
            Err(e) => {
                let err = ExtractError::NetworkFailure(e.to_string());
                outcome.diagnose("fetch", err.to_string(), err.severity());
            }
        }
        return;
    }

    let browser = match session.browser().await {
        Ok(browser) => browser,
        Err(e) => {
            let err = ExtractError::NetworkFailure(e.to_string());
            outcome.diagnose("fetch", err.to_string(), err.severity());
            return;
        }
    };

    let paginated = project.page_locator.is_some();
    let mut page_number = 1usize;
    let mut html = String::new();
    let mut state = WalkState::Fetching;

    while state != WalkState::Done {
        state = match state {
            WalkState::Fetching => {
                // Pages after the first are reached by clicking, not by URL
                if page_number == 1 {
                    if let Err(e) = browser.goto(&page_url(&project.url, 1)).await {
                        let err = ExtractError::NetworkFailure(e.to_string());
                        outcome.diagnose("fetch", err.to_string(), err.severity());
                        break;
                    }
                }
                match browser.content().await {
                    Ok(source) => {
                        html = source;
                        WalkState::Extracting
                    }
                    Err(e) => {
                        let err = ExtractError::NetworkFailure(e.to_string());
                        outcome.diagnose("fetch", err.to_string(), err.severity());
                        WalkState::Done
                    }
                }
            }
            WalkState::Extracting => {
                let records =
                    record_builder::extract_page(&html, &project.fields, page_number, paginated, outcome);
                debug!(page = page_number, records = records.len(), "Page extracted");
                outcome.records.extend(records);
                if paginated {
                    WalkState::Advancing
                } else {
                    WalkState::Done
                }
            }
            WalkState::Advancing => {
                let locator = match &project.page_locator {
                    Some(locator) => locator.as_str(),
                    None => break,
                };
                let next = advance(browser, locator, outcome).await;
                if next == WalkState::Fetching {
                    page_number += 1;
                }
                next
            }
            WalkState::Done => break,
        };
    }

    info!(
        project = %project.name,
        pages = page_number,
        records = outcome.records.len(),
        "Page walk finished"
    );
}

/// 推进到下一页
///
/// 先立即探测：控件不存在即已到最后一页，不产生诊断。
/// 控件存在时有界等待其变为可点击，超时只降级为警告；
/// 点击或滚动失败升为错误。两条失败路径都终止遍历。
async fn advance(
    browser: &BrowserSession,
    locator: &str,
    outcome: &mut ExtractionOutcome,
) -> WalkState {
    if matches!(browser.find(locator).await, Err(SessionError::NotFound(_))) {
        debug!(locator = %locator, "Pagination control absent, walk complete");
        return WalkState::Done;
    }

    let element = match browser.wait_for_clickable(locator).await {
        Ok(element) => element,
        Err(SessionError::WaitTimeout(_)) => {
            let err = ExtractError::PaginationTimeout(locator.to_string());
            outcome.diagnose("pagination", err.to_string(), err.severity());
            return WalkState::Done;
        }
        Err(e) => {
            let err = ExtractError::PaginationUnexpected(e.to_string());
            outcome.diagnose("pagination", err.to_string(), err.severity());
            return WalkState::Done;
        }
    };

    if let Err(e) = browser.scroll_and_click(&element).await {
        let err = ExtractError::PaginationUnexpected(e.to_string());
        outcome.diagnose("pagination", err.to_string(), err.severity());
        return WalkState::Done;
    }
    browser.settle().await;
    WalkState::Fetching
}
