//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the shared HTTP client
//! - Pick the state backend
//! - Wire the notifier and optional publisher into a [`Monitor`]
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Emulator endpoints never receive credentials

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::MonitorConfig;
use crate::error::{MonitorError, MonitorResult};
use crate::gcp::Credentials;
use crate::health::HttpProbe;
use crate::monitor::Monitor;
use crate::notify::{SlackNotifier, Titles};
use crate::publish::PubSubPublisher;
use crate::state::{BaselineStore, FileStore, GcsStore, StateStore};

const USER_AGENT: &str = concat!("uptime-monitor/", env!("CARGO_PKG_VERSION"));

/// The client used for the probe and every API call.
pub fn build_http_client(config: &MonitorConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.target.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
}

fn credentials_for(emulator: Option<&str>, shared: &Arc<Credentials>) -> Arc<Credentials> {
    match emulator {
        Some(_) => Arc::new(Credentials::Anonymous),
        None => Arc::clone(shared),
    }
}

fn build_store(
    config: &MonitorConfig,
    client: &reqwest::Client,
    google: &Arc<Credentials>,
) -> MonitorResult<Box<dyn StateStore>> {
    let storage = &config.storage;

    if let Some(bucket) = &storage.bucket_name {
        let emulator = storage.emulator_host.as_deref();
        let store = GcsStore::new(
            client.clone(),
            credentials_for(emulator, google),
            &GcsStore::resolve_base(emulator),
            bucket.clone(),
        )?;
        return Ok(Box::new(store));
    }

    if let Some(dir) = &storage.state_dir {
        return Ok(Box::new(FileStore::new(dir.clone())));
    }

    Ok(Box::new(BaselineStore))
}

/// Assemble a [`Monitor`] from a validated configuration.
pub fn build_monitor(config: &MonitorConfig) -> MonitorResult<Monitor> {
    let target = Url::parse(&config.target.url)
        .map_err(|e| MonitorError::Startup(format!("invalid target URL: {e}")))?;
    let client = build_http_client(config)
        .map_err(|e| MonitorError::Startup(format!("HTTP client: {e}")))?;
    let google = Arc::new(Credentials::from_config(&config.gcp, client.clone()));

    let store = build_store(config, &client, &google)?;
    let notifier = SlackNotifier::new(
        client.clone(),
        &config.slack.api_url,
        config.slack.api_token.clone(),
        config.slack.channel_id.clone(),
    )?;

    tracing::info!(
        target = %target,
        state_backend = store.backend(),
        timeout_secs = config.target.timeout_secs,
        publish = config.pubsub.enabled(),
        "Configuration loaded"
    );

    let probe = HttpProbe::new(client.clone(), target);
    let mut monitor = Monitor::new(
        config.target.url.clone(),
        Box::new(probe),
        store,
        Box::new(notifier),
    )
    .with_titles(Titles::from(&config.slack));

    if let (Some(project), Some(topic)) = (&config.pubsub.project_id, &config.pubsub.topic_id) {
        let emulator = config.pubsub.emulator_host.as_deref();
        let publisher = PubSubPublisher::new(
            client,
            credentials_for(emulator, &google),
            &PubSubPublisher::resolve_base(emulator),
            project,
            topic,
        )?;
        monitor = monitor.with_publisher(Box::new(publisher));
    }

    Ok(monitor)
}
