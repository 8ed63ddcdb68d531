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

use extractrs::config::settings::Settings;
use extractrs::pipeline::orchestrator::Extractor;
use extractrs::queue::scheduler::{InMemoryTriggerStore, RecurringScheduler};
use extractrs::utils::telemetry::init_telemetry;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry();
    info!("Starting extractrs...");

    let settings = Arc::new(Settings::new()?);
    info!(projects = settings.projects.len(), "Configuration loaded");

    let extractor = Arc::new(Extractor::new(Arc::clone(&settings)));
    let store = Arc::new(InMemoryTriggerStore::new());
    let scheduler = RecurringScheduler::new(store, extractor);
    scheduler.run_scheduled_batch(&settings.projects).await;

    info!("extractrs is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");
    Ok(())
}
