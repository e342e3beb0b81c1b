use serde::{Deserialize, Serialize};

use crate::domain::TokenReport;
use crate::error::ReportError;

// Liquidity (USD): strict `<` on each bound.
pub const LIQUIDITY_CRITICAL_USD: f64 = 1_000.0;
pub const LIQUIDITY_LOW_USD: f64 = 10_000.0;
pub const LIQUIDITY_MODERATE_USD: f64 = 100_000.0;

// Largest holder share (%): strict `>` on each bound.
pub const HOLDER_DOMINANT_PCT: f64 = 50.0;
pub const HOLDER_HEAVY_PCT: f64 = 30.0;
pub const HOLDER_NOTABLE_PCT: f64 = 10.0;

// LP locked (%): strict `<` on each bound.
pub const LP_LOCK_WEAK_PCT: f64 = 50.0;
pub const LP_LOCK_PARTIAL_PCT: f64 = 80.0;
pub const LP_LOCK_STRONG_PCT: f64 = 95.0;

pub const UNVERIFIED_POINTS: f64 = 15.0;
pub const AUTHORITY_POINTS: f64 = 15.0;

pub const MAX_SCORE: f64 = 100.0;

// Risk level thresholds (score %).
pub const LEVEL_MEDIUM_FROM: f64 = 20.0;
pub const LEVEL_HIGH_FROM: f64 = 50.0;
pub const LEVEL_VERY_HIGH_FROM: f64 = 80.0;

// Closing-summary colour bands; distinct from the level thresholds.
pub const SUMMARY_ALERT_ABOVE: f64 = 60.0;
pub const SUMMARY_WARN_ABOVE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score < LEVEL_MEDIUM_FROM {
            RiskLevel::Low
        } else if score < LEVEL_HIGH_FROM {
            RiskLevel::Medium
        } else if score < LEVEL_VERY_HIGH_FROM {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation-neutral severity; terminal and SVG each map it to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Safe,
    Warning,
    Danger,
    Critical,
}

pub fn level_to_severity(level: RiskLevel) -> Severity {
    match level {
        RiskLevel::Low => Severity::Safe,
        RiskLevel::Medium => Severity::Warning,
        RiskLevel::High => Severity::Danger,
        RiskLevel::VeryHigh => Severity::Critical,
    }
}

/// Colour band for the closing score echo (40/60, strict `>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryBand {
    Calm,
    Elevated,
    Alarming,
}

impl SummaryBand {
    pub fn from_score(score: f64) -> Self {
        if score > SUMMARY_ALERT_ABOVE {
            SummaryBand::Alarming
        } else if score > SUMMARY_WARN_ABOVE {
            SummaryBand::Elevated
        } else {
            SummaryBand::Calm
        }
    }
}

/// Points contributed by each scoring factor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FactorPoints {
    pub liquidity: f64,
    pub holder_concentration: f64,
    pub lp_lock: f64,
    pub verification: f64,
    pub authority: f64,
}

impl FactorPoints {
    pub fn total(&self) -> f64 {
        self.liquidity + self.holder_concentration + self.lp_lock + self.verification + self.authority
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    /// 0..=100, higher is riskier.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub factors: FactorPoints,
}

impl RiskAssessment {
    pub fn severity(&self) -> Severity {
        level_to_severity(self.risk_level)
    }

    pub fn summary_band(&self) -> SummaryBand {
        SummaryBand::from_score(self.risk_score)
    }
}

pub fn liquidity_points(liquidity_usd: f64) -> f64 {
    if liquidity_usd < LIQUIDITY_CRITICAL_USD {
        25.0
    } else if liquidity_usd < LIQUIDITY_LOW_USD {
        15.0
    } else if liquidity_usd < LIQUIDITY_MODERATE_USD {
        5.0
    } else {
        0.0
    }
}

pub fn holder_points(top_holder_pct: f64) -> f64 {
    if top_holder_pct > HOLDER_DOMINANT_PCT {
        25.0
    } else if top_holder_pct > HOLDER_HEAVY_PCT {
        15.0
    } else if top_holder_pct > HOLDER_NOTABLE_PCT {
        5.0
    } else {
        0.0
    }
}

pub fn lp_lock_points(lp_locked_pct: f64) -> f64 {
    if lp_locked_pct < LP_LOCK_WEAK_PCT {
        20.0
    } else if lp_locked_pct < LP_LOCK_PARTIAL_PCT {
        10.0
    } else if lp_locked_pct < LP_LOCK_STRONG_PCT {
        5.0
    } else {
        0.0
    }
}

/// Additive five-factor penalty score.
///
/// Requires at least one holder and one market. A primary market without LP
/// data is scored as 0% locked.
pub fn compute_risk(report: &TokenReport) -> Result<RiskAssessment, ReportError> {
    let top = report.top_holder().ok_or(ReportError::NoHolders)?;
    if report.primary_market().is_none() {
        return Err(ReportError::NoMarkets);
    }
    let lp_locked = report.lp_locked_pct().unwrap_or(0.0);

    let factors = FactorPoints {
        liquidity: liquidity_points(report.total_market_liquidity),
        holder_concentration: holder_points(top.pct),
        lp_lock: lp_lock_points(lp_locked),
        verification: if report.jup_verified() { 0.0 } else { UNVERIFIED_POINTS },
        authority: if report.is_renounced() { 0.0 } else { AUTHORITY_POINTS },
    };

    let risk_score = (factors.total() * (100.0 / MAX_SCORE)).clamp(0.0, 100.0);

    Ok(RiskAssessment {
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        factors,
    })
}
