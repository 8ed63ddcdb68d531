// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::ProjectConfig;
use crate::engines::browser_session::BrowserSession;
use crate::utils::errors::ExtractError;
use tracing::{debug, info};

/// 执行登录流程
///
/// 未配置登录页时直接返回。否则导航到登录页，按声明顺序
/// 填入全部凭据，再等待提交控件可点击并点击。任何一步失败
/// 都使登录整体失败，后续提取不再进行。凭据值不写入日志。
pub async fn perform_login(
    browser: &BrowserSession,
    project: &ProjectConfig,
) -> Result<(), ExtractError> {
    let login_url = match &project.login_url {
        Some(url) => url,
        None => return Ok(()),
    };

    info!(project = %project.name, "Performing login");
    browser
        .goto(login_url)
        .await
        .map_err(|e| ExtractError::LoginFailure(format!("login page unreachable: {}", e)))?;

    for credential in &project.login_data {
        browser
            .type_into(&credential.locator, &credential.value)
            .await
            .map_err(|e| {
                ExtractError::LoginFailure(format!(
                    "could not fill control '{}': {}",
                    credential.locator, e
                ))
            })?;
        debug!(locator = %credential.locator, "Credential field filled");
    }

    if let Some(submit) = &project.submit_locator {
        let element = browser.wait_for_clickable(submit).await.map_err(|e| {
            ExtractError::LoginFailure(format!("submit control '{}' not clickable: {}", submit, e))
        })?;
        browser.scroll_and_click(&element).await.map_err(|e| {
            ExtractError::LoginFailure(format!("submit click on '{}' failed: {}", submit, e))
        })?;
        browser.settle().await;
    }

    info!(project = %project.name, "Login sequence completed");
    Ok(())
}
