use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;

use super::error::SubmitError;
use crate::model::{
    QuestionnaireResult, QuestionnaireSubmission, StopReasonResult, StopReasonSubmission,
};

/// Sends form submissions to the trip-tracking API.
///
/// One call is one request: no retries, no batching.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// `POST /stop-reason`.
    async fn submit_stop_reason(
        &self,
        submission: &StopReasonSubmission,
    ) -> Result<StopReasonResult, SubmitError>;

    /// `POST /questionnaire/{start_state_id}`.
    async fn submit_questionnaire(
        &self,
        start_state_id: i64,
        submission: &QuestionnaireSubmission,
    ) -> Result<QuestionnaireResult, SubmitError>;
}

/// [`Submitter`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSubmitter {
    /// Creates a submitter that posts under `base_url`.
    pub fn new(base_url: &Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, SubmitError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "submission got no response");
                SubmitError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            let err = SubmitError::from_response(status.as_u16(), &bytes);
            warn!(%url, status = status.as_u16(), error = %err, "submission rejected");
            return Err(err);
        }

        info!(%url, status = status.as_u16(), "submission accepted");
        response
            .json::<R>()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit_stop_reason(
        &self,
        submission: &StopReasonSubmission,
    ) -> Result<StopReasonResult, SubmitError> {
        self.post_json("stop-reason", submission).await
    }

    async fn submit_questionnaire(
        &self,
        start_state_id: i64,
        submission: &QuestionnaireSubmission,
    ) -> Result<QuestionnaireResult, SubmitError> {
        self.post_json(&format!("questionnaire/{start_state_id}"), submission)
            .await
    }
}
