//! Fire-and-forget webhook notifier.
//!
//! Some deployments forward new submissions to a third-party integration.
//! The notification is advisory: the intake service spawns it after the
//! insert and only logs failures, so this adapter reports errors but never
//! participates in the success contract.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{NotifyError, SubmissionNotifier};
use crate::domain::Submission;

/// `reqwest`-backed webhook notifier posting a submission summary.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Create a notifier targeting the configured webhook URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SubmissionNotifier for WebhookNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        let payload = json!({
            "id": submission.id,
            "formType": submission.form_type,
            "formTitle": submission.form_title,
            "submittedBy": submission.submitted_by,
            "submittedAt": submission.submitted_at.to_rfc3339(),
            "hasDefects": submission.has_defects,
            "brand": submission.brand.as_str(),
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| NotifyError::request(err.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::status(response.status().as_u16()));
        }
        Ok(())
    }
}
