// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::ProjectConfig;
use crate::pipeline::orchestrator::Extractor;
use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

/// 定时任务体
pub type JobFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// 触发器存储
///
/// 以名字为身份管理周期触发器。同名注册是替换而不是叠加，
/// 旧触发器随替换停止。
#[async_trait]
pub trait TriggerStore: Send + Sync {
    /// 注册或替换一个周期触发器
    async fn register(&self, name: &str, every: Duration, job: JobFn);

    /// 移除触发器，返回是否存在
    async fn remove(&self, name: &str) -> bool;

    fn contains(&self, name: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct TriggerHandle {
    every: Duration,
    task: JoinHandle<()>,
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        // Replacement and removal both stop the old ticker here
        self.task.abort();
    }
}

/// 进程内触发器存储
///
/// 每个触发器是一个tokio定时任务，首次触发发生在一个完整
/// 间隔之后而不是注册时。进程退出即全部停止，不跨进程持久化。
#[derive(Default)]
pub struct InMemoryTriggerStore {
    triggers: DashMap<String, TriggerHandle>,
}

impl InMemoryTriggerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 触发器当前的注册间隔
    pub fn interval_of(&self, name: &str) -> Option<Duration> {
        self.triggers.get(name).map(|handle| handle.every)
    }
}

#[async_trait]
impl TriggerStore for InMemoryTriggerStore {
    async fn register(&self, name: &str, every: Duration, job: JobFn) {
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                job().await;
            }
        });
        self.triggers
            .insert(name.to_string(), TriggerHandle { every, task });
    }

    async fn remove(&self, name: &str) -> bool {
        self.triggers.remove(name).is_some()
    }

    fn contains(&self, name: &str) -> bool {
        self.triggers.contains_key(name)
    }

    fn len(&self) -> usize {
        self.triggers.len()
    }
}

/// 周期调度器
///
/// 为每个项目注册一个名为 `Scrape-<项目名>` 的周期触发器，
/// 触发时按项目名驱动编排器。注册幂等：同名项目重复注册时
/// 新间隔生效，旧触发器停止。
pub struct RecurringScheduler {
    store: Arc<dyn TriggerStore>,
    extractor: Arc<Extractor>,
}

impl RecurringScheduler {
    pub fn new(store: Arc<dyn TriggerStore>, extractor: Arc<Extractor>) -> Self {
        Self { store, extractor }
    }

    /// 项目对应的触发器名
    pub fn trigger_name(project_name: &str) -> String {
        format!("Scrape-{}", project_name)
    }

    /// 注册一个项目的周期触发器
    ///
    /// 间隔无法解析的项目跳过注册并记录错误，不影响其余项目。
    pub async fn register_project(&self, project: &ProjectConfig) {
        let every = match project.schedule.interval() {
            Ok(every) => every,
            Err(err) => {
                error!(project = %project.name, "Trigger not registered: {}", err);
                return;
            }
        };

        let extractor = Arc::clone(&self.extractor);
        let project_name = project.name.clone();
        let job: JobFn = Arc::new(move || {
            let extractor = Arc::clone(&extractor);
            let project_name = project_name.clone();
            Box::pin(async move {
                extractor.run_by_name(&project_name).await;
            })
        });

        let trigger = Self::trigger_name(&project.name);
        self.store.register(&trigger, every, job).await;
        info!(trigger = %trigger, every = ?every, "Recurring trigger registered");
    }

    /// 批量注册项目触发器
    pub async fn run_scheduled_batch(&self, projects: &[ProjectConfig]) {
        for project in projects {
            self.register_project(project).await;
        }
        info!(triggers = self.store.len(), "Scheduled batch registered");
    }

    /// 停止并移除一个项目的触发器
    pub async fn remove_project(&self, project_name: &str) -> bool {
        self.store.remove(&Self::trigger_name(project_name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_job(counter: Arc<AtomicUsize>) -> JobFn {
        Arc::new(move || {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
    }

    #[tokio::test]
    async fn test_registration_by_same_name_replaces_the_trigger() {
        let store = InMemoryTriggerStore::new();
        let counter = Arc::new(AtomicUsize::new(0));

        store
            .register("Scrape-news", Duration::from_secs(60), counting_job(Arc::clone(&counter)))
            .await;
        store
            .register("Scrape-news", Duration::from_secs(120), counting_job(counter))
            .await;

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.interval_of("Scrape-news"),
            Some(Duration::from_secs(120))
        );
    }

    #[tokio::test]
    async fn test_remove_stops_tracking_the_trigger() {
        let store = InMemoryTriggerStore::new();
        let counter = Arc::new(AtomicUsize::new(0));
        store
            .register("Scrape-news", Duration::from_secs(60), counting_job(counter))
            .await;

        assert!(store.contains("Scrape-news"));
        assert!(store.remove("Scrape-news").await);
        assert!(!store.contains("Scrape-news"));
        assert!(store.is_empty());
        assert!(!store.remove("Scrape-news").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_firing_waits_one_full_interval() {
        let store = InMemoryTriggerStore::new();
        let counter = Arc::new(AtomicUsize::new(0));
        store
            .register(
                "Scrape-news",
                Duration::from_secs(10),
                counting_job(Arc::clone(&counter)),
            )
            .await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(26)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_trigger_names_follow_the_scrape_prefix() {
        assert_eq!(RecurringScheduler::trigger_name("news"), "Scrape-news");
    }
}
