use super::{ApiErrorBody, SubmissionFailure, SubmissionOutcome, TransportError, UserSink};
use crate::config::MigrationConfig;
use crate::types::UserPayload;
use crate::Result;
use async_trait::async_trait;
use url::Url;

const USERS_PATH: &str = "v1/users";

/// HTTP client for Clerk's Backend API user endpoint.
pub struct ClerkTransport {
    client: reqwest::Client,
    users_url: Url,
    secret_key: String,
}

impl ClerkTransport {
    pub fn new(config: &MigrationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(TransportError::Http)?;

        // Url::join drops the last path segment unless the base ends with '/'.
        let mut base = config.api_base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let users_url = base.join(USERS_PATH).map_err(|e| {
            crate::Error::Transport(TransportError::Other(format!(
                "invalid users endpoint: {}",
                e
            )))
        })?;

        Ok(Self {
            client,
            users_url,
            secret_key: config.clerk_secret_key.clone(),
        })
    }

    pub fn users_url(&self) -> &Url {
        &self.users_url
    }
}

#[async_trait]
impl UserSink for ClerkTransport {
    async fn create_user(&self, payload: &UserPayload) -> SubmissionOutcome {
        let response = match self
            .client
            .post(self.users_url.clone())
            .bearer_auth(&self.secret_key)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SubmissionOutcome::Failed(SubmissionFailure::Transport(e.to_string())),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return SubmissionOutcome::Failed(SubmissionFailure::Transport(e.to_string())),
        };

        if status.is_success() {
            let ack = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
            return SubmissionOutcome::Created(ack);
        }

        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) if !parsed.errors.is_empty() => {
                SubmissionOutcome::Failed(SubmissionFailure::Rejected {
                    status: status.as_u16(),
                    issues: parsed.errors,
                })
            }
            _ => SubmissionOutcome::Failed(SubmissionFailure::Unexpected {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
