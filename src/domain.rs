use serde::{Deserialize, Serialize};

/// Token report as returned by `GET /tokens/{address}/report`.
///
/// Only the fields the analyzer reads are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenReport {
    #[serde(rename = "tokenMeta")]
    pub token_meta: TokenMeta,
    pub token: TokenSupply,

    #[serde(rename = "totalMarketLiquidity", default)]
    pub total_market_liquidity: f64,

    /// Largest holder first.
    #[serde(rename = "topHolders", default)]
    pub top_holders: Vec<Holder>,
    #[serde(default)]
    pub markets: Vec<Market>,

    #[serde(default)]
    pub verification: Option<Verification>,

    #[serde(rename = "mintAuthority", default)]
    pub mint_authority: Option<String>,
    #[serde(rename = "freezeAuthority", default)]
    pub freeze_authority: Option<String>,

    #[serde(rename = "transferFee", default)]
    pub transfer_fee: Option<TransferFee>,

    #[serde(rename = "detectedAt", default)]
    pub detected_at: Option<Timestamp>,

    #[serde(default)]
    pub rugged: bool,
    #[serde(default)]
    pub risks: Option<Vec<RiskFlag>>,

    #[serde(rename = "totalLPProviders", default)]
    pub total_lp_providers: u64,
}

/// `detectedAt` arrives either as an RFC 3339 string or as epoch millis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMeta {
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSupply {
    /// Raw supply in base units.
    pub supply: u64,
    pub decimals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holder {
    pub address: String,
    #[serde(rename = "uiAmount", default)]
    pub ui_amount: f64,
    /// 0..=100
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    #[serde(rename = "marketType", default)]
    pub market_type: Option<String>,
    #[serde(rename = "mintLP", default)]
    pub mint_lp: Option<String>,
    #[serde(default)]
    pub lp: Option<LiquidityPool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityPool {
    #[serde(rename = "lpLockedPct", default)]
    pub lp_locked_pct: f64,
    #[serde(rename = "lpLockedUSD", default)]
    pub lp_locked_usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Verification {
    #[serde(default)]
    pub jup_verified: bool,
    #[serde(default)]
    pub links: Option<Vec<Link>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub provider: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransferFee {
    #[serde(default)]
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFlag {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl TokenReport {
    /// `supply / 10^decimals`
    pub fn normalized_supply(&self) -> f64 {
        self.token.supply as f64 / 10f64.powi(self.token.decimals as i32)
    }

    pub fn is_renounced(&self) -> bool {
        self.mint_authority.is_none() && self.freeze_authority.is_none()
    }

    pub fn top_holder(&self) -> Option<&Holder> {
        self.top_holders.first()
    }

    pub fn primary_market(&self) -> Option<&Market> {
        self.markets.first()
    }

    pub fn lp_locked_pct(&self) -> Option<f64> {
        self.primary_market()
            .and_then(|m| m.lp.as_ref())
            .map(|lp| lp.lp_locked_pct)
    }

    pub fn jup_verified(&self) -> bool {
        self.verification.as_ref().is_some_and(|v| v.jup_verified)
    }

    pub fn links(&self) -> &[Link] {
        self.verification
            .as_ref()
            .and_then(|v| v.links.as_deref())
            .unwrap_or(&[])
    }

    pub fn transfer_fee_pct(&self) -> f64 {
        self.transfer_fee.as_ref().map_or(0.0, |f| f.pct)
    }

    pub fn has_risk_flags(&self) -> bool {
        self.risks.as_ref().is_some_and(|r| !r.is_empty())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A clean, well-established token; every scoring factor at zero.
    pub fn safe_report() -> TokenReport {
        TokenReport {
            token_meta: TokenMeta { name: "Safe Coin".into(), symbol: "SAFE".into() },
            token: TokenSupply { supply: 1_000_000_000_000, decimals: 6 },
            total_market_liquidity: 200_000.0,
            top_holders: vec![
                Holder { address: "Hold1".into(), ui_amount: 50_000.0, pct: 5.0 },
                Holder { address: "Hold2".into(), ui_amount: 40_000.0, pct: 4.0 },
            ],
            markets: vec![Market {
                market_type: Some("raydium".into()),
                mint_lp: Some("LpMint111".into()),
                lp: Some(LiquidityPool { lp_locked_pct: 99.0, lp_locked_usd: 150_000.0 }),
            }],
            verification: Some(Verification { jup_verified: true, links: None }),
            mint_authority: None,
            freeze_authority: None,
            transfer_fee: Some(TransferFee { pct: 0.0 }),
            detected_at: Some(Timestamp::Text("2024-01-01T00:00:00Z".into())),
            rugged: false,
            risks: Some(vec![]),
            total_lp_providers: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "mint": "So11111111111111111111111111111111111111112",
        "tokenMeta": { "name": "Bonk", "symbol": "BONK", "uri": "ignored" },
        "token": { "supply": 123456789000, "decimals": 5, "isInitialized": true },
        "totalMarketLiquidity": 4321.5,
        "topHolders": [
            { "address": "A1", "uiAmount": 600000.0, "pct": 48.6, "insider": false },
            { "address": "A2", "uiAmount": 10.5, "pct": 0.1 }
        ],
        "markets": [
            { "marketType": "raydium", "mintLP": "LP1", "lp": { "lpLockedPct": 88.25, "lpLockedUSD": 1200.0 } },
            { "marketType": "orca" }
        ],
        "verification": { "jup_verified": false, "links": [ { "provider": "twitter", "value": "https://x.com/bonk" } ] },
        "mintAuthority": null,
        "freezeAuthority": "Freeze111",
        "transferFee": { "pct": 0, "maxAmount": 0 },
        "detectedAt": "2024-03-01T10:00:00.123Z",
        "rugged": false,
        "risks": [ { "name": "Low liquidity", "description": "thin pool", "level": "warn", "score": 100 } ],
        "totalLPProviders": 3
    }"#;

    #[test]
    fn decodes_upstream_payload() {
        let r: TokenReport = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(r.token_meta.symbol, "BONK");
        assert_eq!(r.top_holders.len(), 2);
        assert_eq!(r.top_holder().unwrap().pct, 48.6);
        assert_eq!(r.lp_locked_pct(), Some(88.25));
        assert_eq!(r.links().len(), 1);
        assert!(!r.jup_verified());
        assert!(!r.is_renounced());
        assert!(r.has_risk_flags());
        assert_eq!(r.total_lp_providers, 3);
        assert!((r.normalized_supply() - 1_234_567.89).abs() < 1e-6);
    }

    #[test]
    fn nullable_sections_fall_back() {
        let raw = r#"{
            "tokenMeta": { "name": "N", "symbol": "S" },
            "token": { "supply": 10, "decimals": 0 },
            "topHolders": [],
            "markets": [ { "lp": null } ],
            "verification": null,
            "transferFee": null,
            "risks": null
        }"#;
        let r: TokenReport = serde_json::from_str(raw).unwrap();
        assert!(r.is_renounced());
        assert!(!r.jup_verified());
        assert!(r.links().is_empty());
        assert_eq!(r.transfer_fee_pct(), 0.0);
        assert_eq!(r.lp_locked_pct(), None);
        assert!(!r.has_risk_flags());
        assert!(r.top_holder().is_none());
        assert!(r.detected_at.is_none());
    }

    #[test]
    fn detected_at_accepts_epoch_millis() {
        let raw = r#"{
            "tokenMeta": { "name": "N", "symbol": "S" },
            "token": { "supply": 10, "decimals": 0 },
            "detectedAt": 1709287200000
        }"#;
        let r: TokenReport = serde_json::from_str(raw).unwrap();
        assert_eq!(r.detected_at, Some(Timestamp::Millis(1_709_287_200_000)));
    }
}
