use super::session::HttpSession;
use super::types::TokenDetails;
use crate::errors::FetchError;
use async_trait::async_trait;

/// Resolves a token address into token details
///
/// Implementations issue their requests through the session they are
/// given and never keep it past the call.
#[async_trait]
pub trait TokenDetailsSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_token_details(
        &self,
        address: &str,
        session: &HttpSession,
    ) -> Result<TokenDetails, FetchError>;
}
