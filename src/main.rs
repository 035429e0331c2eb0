#![allow(non_snake_case)]

mod calendar;
mod cli;
mod clients;
mod config;
mod events;
mod models;
mod runtime;
mod service;
mod tasks;

use std::sync::Arc;
use std::time::Duration;

use crate::clients::firebase_client::FirebaseFamilyStore;
use crate::config::AppConfig;
use crate::service::assistant_service::GeminiAssistant;

const DEFAULT_RUN_MODE: &str = "cli";

#[tokio::main]
async fn main() {
    let config = AppConfig::load();

    let db_url = config
        .get("FIREBASE_DB_URL")
        .expect("FIREBASE_DB_URL must be set");
    let storage_url = config.get("FIREBASE_STORAGE_URL").unwrap_or_default();
    let store = Arc::new(FirebaseFamilyStore::new(
        db_url,
        storage_url,
        config.family_id(),
    ));

    let tz = config.timezone();
    let run_mode = config.get("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string());
    let mut family_runtime = runtime::start(store.clone(), config.poll_interval());

    if run_mode == "watch" {
        runtime::run_watch(&mut family_runtime, tz, Duration::from_secs(60)).await;
    } else if run_mode == "cli" {
        let gemini_api_key = config
            .get("GEMINI_API_KEY")
            .expect("GEMINI_API_KEY environment variable not set");
        let parser = Arc::new(GeminiAssistant::new(gemini_api_key));
        cli::cli(&mut family_runtime, store, parser, tz).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
