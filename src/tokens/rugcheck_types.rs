/// Rugcheck API response types
///
/// Every field is optional: the service omits fields freely for young or
/// unusual tokens, and a missing field must not fail the whole report.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RugcheckResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub mint: String,
    pub token_program: Option<String>,
    pub token_type: Option<String>,
    pub token: Option<RugcheckToken>,
    pub token_meta: Option<RugcheckTokenMeta>,
    pub file_meta: Option<RugcheckFileMeta>,
    pub creator: Option<String>,
    /// Raw token units; can exceed any fixed-width integer
    pub creator_balance: Option<Number>,
    pub score: Option<i64>,
    #[serde(rename = "score_normalised")]
    pub score_normalised: Option<i64>,
    pub rugged: Option<bool>,
    pub risks: Option<Vec<RugcheckRiskItem>>,
    pub markets: Option<Vec<RugcheckMarket>>,
    pub total_market_liquidity: Option<f64>,
    pub total_stable_liquidity: Option<f64>,
    #[serde(rename = "totalLPProviders")]
    pub total_lp_providers: Option<i64>,
    pub total_holders: Option<i64>,
    pub top_holders: Option<Vec<RugcheckTopHolder>>,
    pub graph_insiders_detected: Option<i64>,
    pub transfer_fee: Option<RugcheckTransferFee>,
    pub price: Option<f64>,
    pub detected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RugcheckToken {
    pub mint_authority: Option<String>,
    pub supply: Option<Number>,
    pub decimals: Option<u8>,
    pub is_initialized: Option<bool>,
    pub freeze_authority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RugcheckTokenMeta {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub uri: Option<String>,
    pub mutable: Option<bool>,
    pub update_authority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RugcheckFileMeta {
    pub description: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RugcheckRiskItem {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RugcheckMarket {
    #[serde(deserialize_with = "null_as_default")]
    pub pubkey: String,
    #[serde(deserialize_with = "null_as_default")]
    pub market_type: String,
    pub lp: Option<RugcheckLpInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RugcheckLpInfo {
    pub lp_locked_pct: Option<f64>,
    #[serde(rename = "lpLockedUSD")]
    pub lp_locked_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RugcheckTopHolder {
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    pub amount: Option<Number>,
    #[serde(deserialize_with = "null_as_default")]
    pub pct: f64,
    pub owner: Option<String>,
    pub insider: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RugcheckTransferFee {
    pub pct: Option<f64>,
    pub max_amount: Option<Number>,
    pub authority: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_amounts_beyond_i64_parse() {
        let json = r#"{
            "mint": "abc",
            "creatorBalance": 10000000000000000000,
            "token": {"supply": 340282366920938463463374607431768211455},
            "topHolders": [{"address": "h1", "amount": 18446744073709551616, "pct": 1.5}]
        }"#;

        let response: RugcheckResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            response.creator_balance,
            Some(Number::from(10_000_000_000_000_000_000u64))
        );
        assert!(response.token.unwrap().supply.is_some());
        let holders = response.top_holders.unwrap();
        assert_eq!(holders[0].address, "h1");
        assert!(holders[0].amount.is_some());
    }

    #[test]
    fn test_explicit_nulls_read_as_defaults() {
        let json = r#"{"mint": null, "risks": [{"name": null, "score": null, "level": "warn"}]}"#;

        let response: RugcheckResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.mint, "");
        let risk = &response.risks.unwrap()[0];
        assert_eq!(risk.name, "");
        assert_eq!(risk.score, 0);
        assert_eq!(risk.level, "warn");
    }
}
