use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ChallengeConfig;
use crate::domain::account::models::ChallengeVerification;
use crate::domain::account::ports::ChallengeVerifier;
use crate::outbound::challenge::messages::SiteverifyRequest;
use crate::outbound::challenge::messages::SiteverifyResponse;

/// Siteverify client for Cloudflare Turnstile compatible challenge services.
///
/// Fails closed: transport errors, timeouts, non-2xx statuses and bodies
/// that do not parse all count as a rejected challenge.
pub struct TurnstileVerifier {
    client: Client,
    verify_url: String,
    secret: String,
}

impl TurnstileVerifier {
    /// Create a new verifier.
    ///
    /// # Arguments
    /// * `config` - Challenge configuration (secret, endpoint, timeout)
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ChallengeConfig) -> Result<Self, anyhow::Error> {
        Self::with_endpoint(&config.verify_url, &config.secret, config.timeout())
    }

    /// Create a verifier for an explicit endpoint.
    pub fn with_endpoint(
        verify_url: &str,
        secret: &str,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("account-service/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::info!(
            verify_url = %verify_url,
            timeout_ms = timeout.as_millis() as u64,
            "Challenge verifier initialized"
        );

        Ok(Self {
            client,
            verify_url: verify_url.to_string(),
            secret: secret.to_string(),
        })
    }

    async fn siteverify(&self, challenge_response: &str) -> Result<SiteverifyResponse, String> {
        let response = self
            .client
            .post(&self.verify_url)
            .json(&SiteverifyRequest {
                secret: &self.secret,
                response: challenge_response,
            })
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("unexpected status {}", status));
        }

        response
            .json::<SiteverifyResponse>()
            .await
            .map_err(|e| format!("malformed response body: {}", e))
    }
}

#[async_trait]
impl ChallengeVerifier for TurnstileVerifier {
    async fn verify(&self, challenge_response: &str) -> ChallengeVerification {
        if challenge_response.trim().is_empty() {
            tracing::debug!("Empty challenge response");
            return ChallengeVerification::rejected();
        }

        match self.siteverify(challenge_response).await {
            Ok(response) => {
                let verification = ChallengeVerification::from(response);
                tracing::debug!(
                    accepted = verification.accepted,
                    hostname = ?verification.hostname,
                    challenge_ts = ?verification.challenge_ts,
                    error_codes = ?verification.error_codes,
                    "Challenge verified"
                );
                verification
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "Challenge verification failed, rejecting");
                ChallengeVerification::rejected()
            }
        }
    }
}
