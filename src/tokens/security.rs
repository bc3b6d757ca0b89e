/// Security profile derived from a Rugcheck report
///
/// This is the flat record the report is built from. Field order here is
/// the order fields appear in the token details.
use super::rugcheck_types::RugcheckResponse;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Number;

/// Normalised scores at or below this are considered safe
const SAFE_SCORE_MAX: i64 = 30;
/// Normalised scores at or below this (and above safe) are a warning
const WARNING_SCORE_MAX: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
    Unknown,
}

impl RiskLevel {
    /// Rugcheck's normalised score grows with risk (0 = clean, 100 = worst)
    pub fn from_score(score_normalised: Option<i64>, rugged: bool) -> Self {
        if rugged {
            return RiskLevel::Danger;
        }
        match score_normalised {
            None => RiskLevel::Unknown,
            Some(score) if score <= SAFE_SCORE_MAX => RiskLevel::Safe,
            Some(score) if score <= WARNING_SCORE_MAX => RiskLevel::Warning,
            Some(_) => RiskLevel::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskEntry {
    pub name: String,
    pub level: String,
    pub score: i64,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolderEntry {
    pub address: String,
    pub owner: Option<String>,
    pub pct: f64,
    pub insider: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSecurityProfile {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub token_program: Option<String>,
    pub token_type: Option<String>,
    pub decimals: Option<u8>,
    pub supply: Option<Number>,
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub update_authority: Option<String>,
    pub mutable_metadata: Option<bool>,
    pub creator: Option<String>,
    pub creator_balance: Option<Number>,
    pub score: Option<i64>,
    pub score_normalised: Option<i64>,
    pub risk_level: RiskLevel,
    pub rugged: bool,
    pub risks: Vec<RiskEntry>,
    pub price_usd: Option<f64>,
    pub total_market_liquidity_usd: Option<f64>,
    pub total_stable_liquidity_usd: Option<f64>,
    pub total_lp_providers: Option<i64>,
    pub total_holders: Option<i64>,
    pub market_count: usize,
    pub max_lp_locked_pct: Option<f64>,
    pub graph_insiders_detected: Option<i64>,
    pub transfer_fee_pct: Option<f64>,
    pub top_holders: Vec<HolderEntry>,
    pub detected_at: Option<String>,
    pub analyzed_at: String,
    pub data_source: &'static str,
}

impl TokenSecurityProfile {
    /// `requested` is used when the response does not echo the mint back
    pub fn from_response(
        requested: &str,
        response: &RugcheckResponse,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        let token = response.token.clone().unwrap_or_default();
        let meta = response.token_meta.clone().unwrap_or_default();
        let file_meta = response.file_meta.clone().unwrap_or_default();
        let rugged = response.rugged.unwrap_or(false);

        let address = if response.mint.trim().is_empty() {
            requested.to_string()
        } else {
            response.mint.clone()
        };

        let mut risks: Vec<RiskEntry> = response
            .risks
            .iter()
            .flatten()
            .map(|risk| RiskEntry {
                name: risk.name.clone(),
                level: risk.level.clone(),
                score: risk.score,
                value: risk.value.clone(),
                description: risk.description.clone(),
            })
            .collect();
        risks.sort_by(|a, b| b.score.cmp(&a.score));

        let markets = response.markets.as_deref().unwrap_or_default();
        let max_lp_locked_pct = markets
            .iter()
            .filter_map(|m| m.lp.as_ref().and_then(|lp| lp.lp_locked_pct))
            .fold(None, |acc: Option<f64>, pct| Some(acc.map_or(pct, |a| a.max(pct))));

        let top_holders = response
            .top_holders
            .iter()
            .flatten()
            .map(|holder| HolderEntry {
                address: holder.address.clone(),
                owner: holder.owner.clone(),
                pct: holder.pct,
                insider: holder.insider.unwrap_or(false),
            })
            .collect();

        Self {
            address,
            name: non_empty(meta.name).or_else(|| non_empty(file_meta.name)),
            symbol: non_empty(meta.symbol).or_else(|| non_empty(file_meta.symbol)),
            description: non_empty(file_meta.description),
            token_program: response.token_program.clone(),
            token_type: non_empty(response.token_type.clone()),
            decimals: token.decimals,
            supply: token.supply,
            mint_authority: token.mint_authority,
            freeze_authority: token.freeze_authority,
            update_authority: meta.update_authority,
            mutable_metadata: meta.mutable,
            creator: response.creator.clone(),
            creator_balance: response.creator_balance.clone(),
            score: response.score,
            score_normalised: response.score_normalised,
            risk_level: RiskLevel::from_score(response.score_normalised, rugged),
            rugged,
            risks,
            price_usd: response.price,
            total_market_liquidity_usd: response.total_market_liquidity,
            total_stable_liquidity_usd: response.total_stable_liquidity,
            total_lp_providers: response.total_lp_providers,
            total_holders: response.total_holders,
            market_count: markets.len(),
            max_lp_locked_pct,
            graph_insiders_detected: response.graph_insiders_detected,
            transfer_fee_pct: response.transfer_fee.as_ref().and_then(|fee| fee.pct),
            top_holders,
            detected_at: response.detected_at.clone(),
            analyzed_at: analyzed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            data_source: "rugcheck",
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const REPORT_JSON: &str = r#"{
        "mint": "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
        "tokenProgram": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
        "tokenType": "",
        "token": {
            "mintAuthority": null,
            "supply": 88000000000000000,
            "decimals": 5,
            "isInitialized": true,
            "freezeAuthority": null
        },
        "tokenMeta": {
            "name": "Bonk",
            "symbol": "Bonk",
            "uri": "https://arweave.net/x",
            "mutable": true,
            "updateAuthority": "9AhKqLR67hwapvG8SA2JFXaCshXc9nALJjpKaHZrsbkw"
        },
        "creator": null,
        "score": 101,
        "score_normalised": 8,
        "rugged": false,
        "risks": [
            {"name": "Mutable metadata", "value": "", "description": "Token metadata can be changed by the owner", "score": 100, "level": "warn"},
            {"name": "Low amount of LP Providers", "value": null, "description": "Only a few users are providing liquidity", "score": 400, "level": "warn"}
        ],
        "markets": [
            {"pubkey": "a", "marketType": "raydium", "lp": {"lpLockedPct": 12.5}},
            {"pubkey": "b", "marketType": "orca", "lp": {"lpLockedPct": 99.1}},
            {"pubkey": "c", "marketType": "meteora", "lp": null}
        ],
        "totalMarketLiquidity": 1523000.5,
        "totalLPProviders": 3,
        "totalHolders": 912345,
        "topHolders": [
            {"address": "h1", "amount": 1000, "pct": 4.2, "owner": "o1", "insider": false},
            {"address": "h2", "amount": 900, "pct": 3.1, "owner": null, "insider": true}
        ],
        "transferFee": {"pct": 0, "maxAmount": 0, "authority": "11111111111111111111111111111111"},
        "detectedAt": "2023-01-01T00:00:00Z"
    }"#;

    fn analyzed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_profile_from_full_report() {
        let response: RugcheckResponse = serde_json::from_str(REPORT_JSON).unwrap();
        let profile = TokenSecurityProfile::from_response("ignored", &response, analyzed_at());

        assert_eq!(profile.address, "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263");
        assert_eq!(profile.symbol.as_deref(), Some("Bonk"));
        assert_eq!(profile.token_type, None);
        assert_eq!(profile.decimals, Some(5));
        assert_eq!(profile.mint_authority, None);
        assert_eq!(profile.mutable_metadata, Some(true));
        assert_eq!(profile.risk_level, RiskLevel::Safe);
        assert_eq!(profile.market_count, 3);
        assert_eq!(profile.max_lp_locked_pct, Some(99.1));
        assert_eq!(profile.transfer_fee_pct, Some(0.0));
        assert_eq!(profile.analyzed_at, "2026-10-16T12:00:00Z");

        // Highest-scoring risk first, null value read as empty
        assert_eq!(profile.risks[0].name, "Low amount of LP Providers");
        assert_eq!(profile.risks[0].value, "");
        assert!(profile.top_holders[1].insider);
    }

    #[test]
    fn test_sparse_report_uses_requested_address() {
        let response: RugcheckResponse = serde_json::from_str("{}").unwrap();
        let profile = TokenSecurityProfile::from_response("TokenXYZ", &response, analyzed_at());

        assert_eq!(profile.address, "TokenXYZ");
        assert_eq!(profile.risk_level, RiskLevel::Unknown);
        assert!(profile.risks.is_empty());
        assert_eq!(profile.max_lp_locked_pct, None);
    }

    #[test]
    fn test_oversized_creator_balance_is_kept() {
        let response: RugcheckResponse =
            serde_json::from_str(r#"{"mint":"abc","creatorBalance":10000000000000000000}"#).unwrap();
        let profile = TokenSecurityProfile::from_response("abc", &response, analyzed_at());

        assert_eq!(
            profile.creator_balance,
            Some(Number::from(10_000_000_000_000_000_000u64))
        );
        let details = serde_json::to_value(&profile).unwrap();
        assert_eq!(details["creator_balance"], serde_json::json!(10_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(Some(0), false), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_score(Some(30), false), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_score(Some(31), false), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_score(Some(61), false), RiskLevel::Danger);
        assert_eq!(RiskLevel::from_score(Some(1), true), RiskLevel::Danger);
        assert_eq!(RiskLevel::from_score(None, false), RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Warning).unwrap(), "\"warning\"");
    }
}
