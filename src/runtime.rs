use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::events::queue::EventBus;
use crate::events::worker::{self, ReadinessGate, readiness_channel};
use crate::models::app_data::AppData;
use crate::service::dashboard_service;
use crate::service::storage_service::FamilyStore;
use crate::tasks::sync_loop::{self, FamilySync};

/// Everything a running view needs: the merged aggregate, the readiness
/// gate, and the subscription handle for teardown.
pub struct FamilyRuntime {
    pub data: Arc<Mutex<AppData>>,
    pub sync: FamilySync,
    pub readiness: ReadinessGate,
    _worker: JoinHandle<()>,
}

impl FamilyRuntime {
    pub fn shutdown(&mut self) {
        self.sync.shutdown();
    }
}

/// Boots the merge pipeline: four collection subscriptions feeding the bus,
/// one worker folding snapshots into the shared aggregate.
pub fn start(store: Arc<dyn FamilyStore>, poll_interval: Duration) -> FamilyRuntime {
    let data = Arc::new(Mutex::new(AppData::new()));
    let (bus, rx) = EventBus::new(16);
    let (signal, readiness) = readiness_channel();
    let worker = tokio::spawn(worker::run_sync_worker(rx, data.clone(), signal));
    let sync = sync_loop::start_family_sync(store, bus, poll_interval);
    FamilyRuntime {
        data,
        sync,
        readiness,
        _worker: worker,
    }
}

/// Long-running mode: keep the subscriptions alive and print the family
/// summary on an interval.
pub async fn run_watch(runtime: &mut FamilyRuntime, tz: chrono_tz::Tz, interval: Duration) {
    runtime.readiness.wait(crate::config::READINESS_WAIT).await;
    loop {
        {
            let data = runtime.data.lock().await;
            let summary = dashboard_service::build_summary(&data, chrono::Utc::now(), tz);
            println!("{}", dashboard_service::render_summary(&summary, &data.members, tz));
            println!("---");
        }
        sleep(interval).await;
    }
}
