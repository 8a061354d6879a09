//! One monitoring pass.
//!
//! # Sequence
//! ```text
//! probe target → read state → detect → write state → notify → publish
//! ```
//!
//! Every step is awaited before the next one starts and the first error ends
//! the run. State is written before the notification goes out; if the
//! notification then fails, the new state stays and the next run sees
//! `Unchanged`.

use tracing::Instrument;
use uuid::Uuid;

use crate::error::MonitorResult;
use crate::health::{detect, Effect, Outcome, StatusLine, StatusProbe};
use crate::notify::{Alert, Notifier, Titles};
use crate::publish::EventPublisher;
use crate::state::{StateKey, StateStore};

/// What a run observed and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub observed: StatusLine,
    pub outcome: Outcome,
    /// Message id of the outage event, if one was published.
    pub published: Option<String>,
}

/// The transition detector wired to its collaborators.
pub struct Monitor {
    target: String,
    key: StateKey,
    probe: Box<dyn StatusProbe>,
    store: Box<dyn StateStore>,
    notifier: Box<dyn Notifier>,
    publisher: Option<Box<dyn EventPublisher>>,
    titles: Titles,
}

impl Monitor {
    pub fn new(
        target: impl Into<String>,
        probe: Box<dyn StatusProbe>,
        store: Box<dyn StateStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let target: String = target.into();
        let key = StateKey::for_target(&target);
        Self {
            target,
            key,
            probe,
            store,
            notifier,
            publisher: None,
            titles: Titles::default(),
        }
    }

    pub fn with_publisher(mut self, publisher: Box<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_titles(mut self, titles: Titles) -> Self {
        self.titles = titles;
        self
    }

    /// The target exactly as configured.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn key(&self) -> &StateKey {
        &self.key
    }

    /// Run one pass inside a span tagged with a fresh run id.
    pub async fn run_once(&self) -> MonitorResult<RunReport> {
        let span = tracing::info_span!(
            "run",
            run_id = %Uuid::new_v4(),
            target = %self.target,
        );
        self.execute().instrument(span).await
    }

    async fn execute(&self) -> MonitorResult<RunReport> {
        let observed = self.probe.observe().await?;
        let stored = self.store.get(&self.key).await?;
        let decision = detect(&observed, stored.as_deref());
        let previous = stored.as_deref().map(String::from_utf8_lossy);

        tracing::info!(
            key = %self.key,
            backend = self.store.backend(),
            observed = %observed,
            previous = previous.as_deref().unwrap_or("<none>"),
            outcome = ?decision.outcome,
            "Status compared"
        );

        let mut published = None;
        for effect in &decision.effects {
            match effect {
                Effect::WriteState(line) => {
                    self.store.put(&self.key, line.as_bytes()).await?;
                    tracing::info!(key = %self.key, status = %line, "Status recorded");
                }
                Effect::Notify(severity) => {
                    let alert = Alert::new(*severity, &self.target, &observed, &self.titles);
                    self.notifier.send(&alert).await?;
                }
                Effect::Publish => match &self.publisher {
                    Some(publisher) => {
                        let id = publisher.publish(self.target.as_str().as_bytes()).await?;
                        published = Some(id);
                    }
                    None => tracing::debug!("No topic configured, skipping outage event"),
                },
            }
        }

        Ok(RunReport {
            observed,
            outcome: decision.outcome,
            published,
        })
    }
}
