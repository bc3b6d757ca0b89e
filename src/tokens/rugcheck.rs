/// Rugcheck token report client
///
/// API: `GET https://api.rugcheck.xyz/v1/tokens/{mint}/report`
use super::rugcheck_types::RugcheckResponse;
use super::security::TokenSecurityProfile;
use super::session::HttpSession;
use super::source::TokenDetailsSource;
use super::types::TokenDetails;
use crate::config::RugcheckConfig;
use crate::errors::FetchError;
use crate::logger::{self, LogTag};
use crate::utils::{looks_like_solana_address, short_address};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use tokio::time::{sleep, Duration};

/// Longest response body echoed back in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct RugcheckClient {
    base_url: String,
    max_attempts: u32,
    retry_base_delay: Duration,
}

impl RugcheckClient {
    pub fn new(config: &RugcheckConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_attempts: config.max_attempts.max(1),
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    pub fn report_url(&self, mint: &str) -> String {
        format!("{}/{}/report", self.base_url, mint)
    }

    /// Backoff before retry number `attempt` (1-based): base * 2^(attempt-1)
    fn retry_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(1u32 << (attempt.saturating_sub(1)).min(16))
    }

    /// Fetch and parse the raw Rugcheck report
    ///
    /// 429, 5xx and transport errors are retried with exponential backoff;
    /// 404 and other statuses fail immediately.
    pub async fn fetch_report(
        &self,
        mint: &str,
        session: &HttpSession,
    ) -> Result<RugcheckResponse, FetchError> {
        let url = self.report_url(mint);
        let mut last_err: Option<String> = None;

        for attempt in 1..=self.max_attempts {
            logger::debug(
                LogTag::Rugcheck,
                &format!("GET {} (attempt {}/{})", url, attempt, self.max_attempts),
            );
            session.record_request();

            let response = session
                .client()
                .get(&url)
                .header("accept", "application/json")
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let raw_json = resp
                            .text()
                            .await
                            .map_err(|e| FetchError::Parse(format!("failed to read body: {}", e)))?;
                        logger::verbose(
                            LogTag::Rugcheck,
                            &format!("Raw report for {}: {}", short_address(mint), raw_json),
                        );
                        return serde_json::from_str::<RugcheckResponse>(&raw_json)
                            .map_err(|e| FetchError::Parse(e.to_string()));
                    }

                    if status == StatusCode::NOT_FOUND {
                        return Err(FetchError::NotFound {
                            address: mint.to_string(),
                        });
                    }

                    let body = resp.text().await.unwrap_or_default();
                    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                        last_err = Some(format!("HTTP {}", status.as_u16()));
                        if attempt < self.max_attempts {
                            let delay = self.retry_delay(attempt);
                            logger::warning(
                                LogTag::Rugcheck,
                                &format!(
                                    "Rugcheck status {} for {}, retrying in {}ms (attempt {}/{})",
                                    status,
                                    short_address(mint),
                                    delay.as_millis(),
                                    attempt,
                                    self.max_attempts
                                ),
                            );
                            sleep(delay).await;
                            continue;
                        }
                    }

                    return Err(FetchError::HttpStatus {
                        status: status.as_u16(),
                        body: truncate_body(&body),
                    });
                }
                Err(e) => {
                    last_err = Some(e.to_string());
                    if attempt < self.max_attempts {
                        let delay = self.retry_delay(attempt);
                        logger::warning(
                            LogTag::Rugcheck,
                            &format!(
                                "HTTP error for {}, retrying in {}ms (attempt {}/{}): {}",
                                short_address(mint),
                                delay.as_millis(),
                                attempt,
                                self.max_attempts,
                                e
                            ),
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(FetchError::Request {
            endpoint: url,
            attempts: self.max_attempts,
            message: last_err.unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response".to_string();
    }
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{}...", head)
}

#[async_trait]
impl TokenDetailsSource for RugcheckClient {
    fn name(&self) -> &str {
        "Rugcheck"
    }

    async fn fetch_token_details(
        &self,
        address: &str,
        session: &HttpSession,
    ) -> Result<TokenDetails, FetchError> {
        // The address is sent as given; only blank input is refused
        if address.trim().is_empty() {
            return Err(FetchError::EmptyAddress);
        }

        if !looks_like_solana_address(address) {
            logger::warning(
                LogTag::Rugcheck,
                &format!("'{}' does not look like a Solana mint address, querying anyway", address),
            );
        }

        let response = self.fetch_report(address, session).await?;
        let profile = TokenSecurityProfile::from_response(address, &response, Utc::now());

        logger::info(
            LogTag::Rugcheck,
            &format!(
                "Report for {}: score {} ({} risk(s), level {:?})",
                short_address(address),
                profile
                    .score_normalised
                    .map_or_else(|| "n/a".to_string(), |s| s.to_string()),
                profile.risks.len(),
                profile.risk_level
            ),
        );

        TokenDetails::from_record(&profile).map_err(|e| FetchError::Parse(e.to_string()))
    }
}
