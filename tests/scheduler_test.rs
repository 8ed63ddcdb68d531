// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use extractrs::config::settings::{BrowserSettings, Settings};
use extractrs::domain::models::project::{FieldSpec, ProjectConfig, ScheduleSpec};
use extractrs::pipeline::orchestrator::Extractor;
use extractrs::queue::scheduler::{InMemoryTriggerStore, RecurringScheduler, TriggerStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn project(name: &str, schedule: ScheduleSpec) -> ProjectConfig {
    ProjectConfig {
        name: name.to_string(),
        url: "http://example.com".to_string(),
        page_locator: None,
        fields: vec![FieldSpec {
            name: "title".to_string(),
            locator: "h1".to_string(),
        }],
        login_url: None,
        login_data: vec![],
        submit_locator: None,
        output_dir: PathBuf::from("Uploads"),
        schedule,
    }
}

fn scheduler_with_store() -> (Arc<InMemoryTriggerStore>, RecurringScheduler) {
    let store = Arc::new(InMemoryTriggerStore::new());
    let trait_store: Arc<dyn TriggerStore> = store.clone();
    let extractor = Arc::new(Extractor::new(Arc::new(Settings {
        browser: BrowserSettings::default(),
        projects: vec![],
    })));
    (store, RecurringScheduler::new(trait_store, extractor))
}

#[tokio::test]
async fn batch_registration_creates_one_trigger_per_project() {
    let (store, scheduler) = scheduler_with_store();
    let projects = vec![
        project("news", ScheduleSpec::Minutes(30)),
        project("shop", ScheduleSpec::Expression("2h".to_string())),
    ];

    scheduler.run_scheduled_batch(&projects).await;

    assert_eq!(store.len(), 2);
    assert!(store.contains("Scrape-news"));
    assert!(store.contains("Scrape-shop"));
    assert_eq!(
        store.interval_of("Scrape-news"),
        Some(Duration::from_secs(1800))
    );
    assert_eq!(
        store.interval_of("Scrape-shop"),
        Some(Duration::from_secs(7200))
    );
}

#[tokio::test]
async fn re_registering_a_project_replaces_its_trigger() {
    let (store, scheduler) = scheduler_with_store();

    scheduler
        .register_project(&project("news", ScheduleSpec::Minutes(30)))
        .await;
    scheduler
        .register_project(&project("news", ScheduleSpec::Minutes(5)))
        .await;

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.interval_of("Scrape-news"),
        Some(Duration::from_secs(300))
    );
}

#[tokio::test]
async fn unsupported_schedule_is_skipped_without_failing_the_batch() {
    let (store, scheduler) = scheduler_with_store();
    let projects = vec![
        project("cron", ScheduleSpec::Expression("*/5 * * * *".to_string())),
        project("news", ScheduleSpec::Minutes(30)),
    ];

    scheduler.run_scheduled_batch(&projects).await;

    assert_eq!(store.len(), 1);
    assert!(!store.contains("Scrape-cron"));
    assert!(store.contains("Scrape-news"));
}

#[tokio::test]
async fn removal_is_keyed_by_project_name() {
    let (store, scheduler) = scheduler_with_store();
    scheduler
        .register_project(&project("news", ScheduleSpec::Minutes(30)))
        .await;

    assert!(scheduler.remove_project("news").await);
    assert!(store.is_empty());
    assert!(!scheduler.remove_project("news").await);
}
