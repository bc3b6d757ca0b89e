/// Token details retrieval
///
/// - `session`: the per-run HTTP session
/// - `source`: the `TokenDetailsSource` seam the run is written against
/// - `rugcheck` / `rugcheck_types`: the Rugcheck implementation of that seam
/// - `security`: flat security profile built from a Rugcheck report
/// - `types`: `TokenDetails`, the key/value record handed to the report
pub mod rugcheck;
pub mod rugcheck_types;
pub mod security;
pub mod session;
pub mod source;
pub mod types;

pub use rugcheck::RugcheckClient;
pub use security::{RiskLevel, TokenSecurityProfile};
pub use session::{is_session_open, open_session_count, HttpSession};
pub use source::TokenDetailsSource;
pub use types::TokenDetails;
