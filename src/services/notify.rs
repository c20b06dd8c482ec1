use std::sync::Arc;
use std::time::Duration;
use reqwest::Client;
use thiserror::Error;
use crate::models::DistanceAlert;

/// Errors that can occur while handing off a distance alert
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("No async runtime available to deliver the alert")]
    NoRuntime,

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Destination for distance alerts
///
/// Implementations must return quickly and should not panic. Anything slow
/// (network calls) belongs on a background task. The resolver logs a returned
/// error and carries on; it also catches a panic raised inside `notify` and
/// logs it, so a faulty sink never fails the lookup. Unwinding must stay
/// enabled for that, so the release profile keeps the default `panic = "unwind"`.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, alert: &DistanceAlert) -> Result<(), NotifyError>;
}

/// Writes alerts to the application log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, alert: &DistanceAlert) -> Result<(), NotifyError> {
        tracing::warn!(
            branch = %alert.branch_name,
            distance_km = alert.distance_km,
            latitude = alert.query_point.latitude,
            longitude = alert.query_point.longitude,
            threshold_km = alert.threshold_km,
            "ALERT: {}",
            alert
        );
        Ok(())
    }
}

/// Posts alerts as JSON to an HTTP endpoint
///
/// Each alert is sent on its own tokio task. Delivery failures are logged and
/// never retried.
pub struct WebhookNotifier {
    url: String,
    client: Client,
}

impl WebhookNotifier {
    /// Create a new webhook notifier
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl NotificationSink for WebhookNotifier {
    fn notify(&self, alert: &DistanceAlert) -> Result<(), NotifyError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;

        let request = self.client.post(&self.url).json(alert);
        let branch = alert.branch_name.clone();

        handle.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(branch = %branch, "Distance alert delivered");
                }
                Ok(response) => {
                    tracing::warn!(
                        branch = %branch,
                        status = response.status().as_u16(),
                        "Alert webhook rejected distance alert"
                    );
                }
                Err(e) => {
                    tracing::warn!(branch = %branch, "Alert webhook request failed: {}", e);
                }
            }
        });

        Ok(())
    }
}

/// Forwards each alert to every wrapped sink
///
/// All sinks are tried even if one fails; the first error is returned.
#[derive(Clone, Default)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutNotifier {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for FanoutNotifier {
    fn notify(&self, alert: &DistanceAlert) -> Result<(), NotifyError> {
        let mut first_error = None;

        for sink in &self.sinks {
            if let Err(e) = sink.notify(alert) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
