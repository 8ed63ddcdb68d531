// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::outcome::{ExtractionOutcome, Severity};
use crate::domain::models::project::ProjectConfig;
use crate::engines::session::PageSession;
use crate::pipeline::harvester::AssetHarvester;
use crate::pipeline::{login, pagination, persistence};
use std::sync::Arc;
use tracing::info;

/// 提取编排器
///
/// 串联一次运行的全部阶段：校验、登录、分页遍历、持久化、
/// 资源收割。所有失败都收敛为结果的状态和诊断信息，从不向
/// 调用方抛出；调度器因此可以无条件地驱动它。
pub struct Extractor {
    settings: Arc<Settings>,
}

impl Extractor {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// 执行提取阶段，不持久化
    ///
    /// 校验失败的项目不产生任何网络或浏览器活动。浏览器句柄
    /// 在每条退出路径上释放。
    pub async fn extract_data(&self, project: &ProjectConfig) -> ExtractionOutcome {
        let (outcome, _) = self.extract_with_session(project).await;
        outcome
    }

    /// 提取并交回本次运行的会话
    ///
    /// 浏览器句柄在返回前已释放；会话中的出站HTTP客户端保留，
    /// 资源收割沿用它作为本次运行的连接上下文。
    async fn extract_with_session(
        &self,
        project: &ProjectConfig,
    ) -> (ExtractionOutcome, Option<PageSession>) {
        let mut outcome = ExtractionOutcome::new();

        if let Err(err) = project.validate() {
            outcome.diagnose("project", err.to_string(), Severity::Error);
            return (outcome, None);
        }

        let mut session = match PageSession::new(self.settings.browser.clone()) {
            Ok(session) => session,
            Err(e) => {
                outcome.diagnose("session", e.to_string(), Severity::Error);
                return (outcome, None);
            }
        };

        self.run_stages(&mut session, project, &mut outcome).await;
        session.release().await;
        (outcome, Some(session))
    }

    async fn run_stages(
        &self,
        session: &mut PageSession,
        project: &ProjectConfig,
        outcome: &mut ExtractionOutcome,
    ) {
        if project.login_url.is_some() {
            let browser = match session.browser().await {
                Ok(browser) => browser,
                Err(e) => {
                    outcome.diagnose("login", e.to_string(), Severity::Error);
                    return;
                }
            };
            if let Err(err) = login::perform_login(browser, project).await {
                outcome.diagnose("login", err.to_string(), err.severity());
                return;
            }
        }
        pagination::walk(session, project, outcome).await;
    }

    /// 执行完整的一次运行：提取、持久化、收割
    pub async fn run(&self, project: &ProjectConfig) -> ExtractionOutcome {
        info!(project = %project.name, "Extraction run started");
        let (mut outcome, session) = self.extract_with_session(project).await;

        match persistence::persist(project, &outcome).await {
            Ok(run_dir) => {
                if let Some(session) = &session {
                    if !outcome.records.is_empty() {
                        let harvester = AssetHarvester::new(session.client());
                        outcome.assets = harvester.harvest(&outcome.records, &run_dir).await;
                    }
                }
            }
            Err(err) => outcome.diagnose("persistence", err.to_string(), err.severity()),
        }

        info!(
            project = %project.name,
            status = %outcome.status,
            records = outcome.records.len(),
            assets = outcome.assets.len(),
            "Extraction run finished"
        );
        outcome
    }

    /// 按项目名执行一次运行
    ///
    /// 调度器注册的触发器只携带项目名，运行时从配置中解析。
    /// 名字未配置时返回 Error 结果而不是panic。
    pub async fn run_by_name(&self, name: &str) -> ExtractionOutcome {
        match self
            .settings
            .projects
            .iter()
            .find(|project| project.name == name)
        {
            Some(project) => self.run(project).await,
            None => {
                let mut outcome = ExtractionOutcome::new();
                outcome.diagnose(
                    "project",
                    format!("no project named '{}' is configured", name),
                    Severity::Error,
                );
                outcome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::BrowserSettings;
    use crate::domain::models::project::{FieldSpec, ScheduleSpec};
    use std::path::PathBuf;

    fn settings_with(projects: Vec<ProjectConfig>) -> Arc<Settings> {
        Arc::new(Settings {
            browser: BrowserSettings::default(),
            projects,
        })
    }

    #[tokio::test]
    async fn test_invalid_project_is_rejected_without_network_activity() {
        let extractor = Extractor::new(settings_with(vec![]));
        let project = ProjectConfig {
            name: "broken".to_string(),
            url: "http://example.com".to_string(),
            page_locator: None,
            fields: vec![],
            login_url: None,
            login_data: vec![],
            submit_locator: None,
            output_dir: PathBuf::from("Uploads"),
            schedule: ScheduleSpec::Minutes(30),
        };

        let outcome = extractor.extract_data(&project).await;

        assert_eq!(outcome.status, Severity::Error);
        assert!(outcome.diagnostics["project"].contains("no extraction fields"));
        assert!(outcome.records.is_empty());
    }

    #[tokio::test]
    async fn test_run_by_name_with_unknown_project_is_an_error_outcome() {
        let extractor = Extractor::new(settings_with(vec![]));
        let outcome = extractor.run_by_name("ghost").await;

        assert_eq!(outcome.status, Severity::Error);
        assert!(outcome.diagnostics["project"].contains("ghost"));
    }

    #[tokio::test]
    async fn test_run_by_name_resolves_configured_projects() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectConfig {
            name: "news".to_string(),
            // Unresolvable host keeps the run local; the outcome must still
            // come back instead of an error escaping the orchestrator.
            url: "http://127.0.0.1:1/".to_string(),
            page_locator: None,
            fields: vec![FieldSpec {
                name: "title".to_string(),
                locator: "h1".to_string(),
            }],
            login_url: None,
            login_data: vec![],
            submit_locator: None,
            output_dir: dir.path().to_path_buf(),
            schedule: ScheduleSpec::Minutes(30),
        };
        let extractor = Extractor::new(settings_with(vec![project]));

        let outcome = extractor.run_by_name("news").await;

        assert_eq!(outcome.status, Severity::Error);
        assert!(outcome.diagnostics.contains_key("fetch"));
    }
}
