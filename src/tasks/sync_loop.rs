use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::events::queue::{EventBus, SyncEvent};
use crate::service::storage_service::FamilyStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Uninitialized,
    Subscribed,
    Updating,
    Unsubscribed,
}

/// Handle over the four collection subscriptions. Shutdown is cooperative:
/// the loops finish their in-flight read, report `Unsubscribed`, and exit.
/// Calling `shutdown` more than once is fine.
pub struct FamilySync {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
    pub member_state: watch::Receiver<SubscriptionState>,
    pub todo_state: watch::Receiver<SubscriptionState>,
    pub event_state: watch::Receiver<SubscriptionState>,
    pub photo_state: watch::Receiver<SubscriptionState>,
}

impl FamilySync {
    pub fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Waits for every loop to finish after `shutdown`.
    pub async fn join(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.await;
        }
    }
}

/// Spawns one independent polling subscription per collection. Each loop
/// reads its collection in full and emits the result as an ordered stream
/// of wholesale snapshots; collections never wait on each other.
pub fn start_family_sync(
    store: Arc<dyn FamilyStore>,
    bus: EventBus,
    poll_interval: Duration,
) -> FamilySync {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (member_tx, member_state) = watch::channel(SubscriptionState::Uninitialized);
    let (todo_tx, todo_state) = watch::channel(SubscriptionState::Uninitialized);
    let (event_tx, event_state) = watch::channel(SubscriptionState::Uninitialized);
    let (photo_tx, photo_state) = watch::channel(SubscriptionState::Uninitialized);

    let handles = vec![
        tokio::spawn(run_member_loop(
            store.clone(),
            bus.clone(),
            poll_interval,
            shutdown_rx.clone(),
            member_tx,
        )),
        tokio::spawn(run_todo_loop(
            store.clone(),
            bus.clone(),
            poll_interval,
            shutdown_rx.clone(),
            todo_tx,
        )),
        tokio::spawn(run_event_loop(
            store.clone(),
            bus.clone(),
            poll_interval,
            shutdown_rx.clone(),
            event_tx,
        )),
        tokio::spawn(run_photo_loop(
            store,
            bus,
            poll_interval,
            shutdown_rx,
            photo_tx,
        )),
    ];

    FamilySync {
        shutdown_tx,
        handles,
        member_state,
        todo_state,
        event_state,
        photo_state,
    }
}

async fn run_member_loop(
    store: Arc<dyn FamilyStore>,
    bus: EventBus,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    state: watch::Sender<SubscriptionState>,
) {
    let _ = state.send(SubscriptionState::Subscribed);
    loop {
        match store.list_members().await {
            Ok(members) => {
                let _ = state.send(SubscriptionState::Updating);
                bus.emit(SyncEvent::Members(members)).await;
            }
            Err(err) => eprintln!("member sync failed: {}", err),
        }
        if wait_or_shutdown(poll_interval, &mut shutdown).await {
            break;
        }
    }
    let _ = state.send(SubscriptionState::Unsubscribed);
}

async fn run_todo_loop(
    store: Arc<dyn FamilyStore>,
    bus: EventBus,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    state: watch::Sender<SubscriptionState>,
) {
    let _ = state.send(SubscriptionState::Subscribed);
    loop {
        match store.list_todos().await {
            Ok(todos) => {
                let _ = state.send(SubscriptionState::Updating);
                bus.emit(SyncEvent::Todos(todos)).await;
            }
            Err(err) => eprintln!("todo sync failed: {}", err),
        }
        if wait_or_shutdown(poll_interval, &mut shutdown).await {
            break;
        }
    }
    let _ = state.send(SubscriptionState::Unsubscribed);
}

async fn run_event_loop(
    store: Arc<dyn FamilyStore>,
    bus: EventBus,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    state: watch::Sender<SubscriptionState>,
) {
    let _ = state.send(SubscriptionState::Subscribed);
    loop {
        match store.list_events().await {
            Ok(events) => {
                let _ = state.send(SubscriptionState::Updating);
                bus.emit(SyncEvent::Events(events)).await;
            }
            Err(err) => eprintln!("event sync failed: {}", err),
        }
        if wait_or_shutdown(poll_interval, &mut shutdown).await {
            break;
        }
    }
    let _ = state.send(SubscriptionState::Unsubscribed);
}

async fn run_photo_loop(
    store: Arc<dyn FamilyStore>,
    bus: EventBus,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    state: watch::Sender<SubscriptionState>,
) {
    let _ = state.send(SubscriptionState::Subscribed);
    loop {
        match store.list_photos().await {
            Ok(photos) => {
                let _ = state.send(SubscriptionState::Updating);
                bus.emit(SyncEvent::Photos(photos)).await;
            }
            Err(err) => eprintln!("photo sync failed: {}", err),
        }
        if wait_or_shutdown(poll_interval, &mut shutdown).await {
            break;
        }
    }
    let _ = state.send(SubscriptionState::Unsubscribed);
}

/// True when the shutdown flag went up during the wait.
async fn wait_or_shutdown(poll_interval: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    tokio::select! {
        _ = sleep(poll_interval) => false,
        _ = shutdown.changed() => *shutdown.borrow(),
    }
}
