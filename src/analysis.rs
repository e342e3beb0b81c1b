use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;
use tracing::info;

use crate::banner::Banner;
use crate::config::Config;
use crate::domain::TokenReport;
use crate::error::ReportError;
use crate::render;
use crate::risk::{compute_risk, RiskAssessment};
use crate::time::resolve_detected_at;

/// A report that has passed every data check and is ready to print.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: TokenReport,
    pub risk: RiskAssessment,
    pub detected: Option<DateTime<Utc>>,
}

impl Analysis {
    /// Scores the report and resolves its timestamp. Nothing is written here,
    /// so bad data never produces a half-printed report.
    pub fn prepare(report: TokenReport) -> Result<Self, ReportError> {
        let risk = compute_risk(&report)?;
        let detected = resolve_detected_at(report.detected_at.as_ref())?;
        info!(
            score = risk.risk_score,
            level = %risk.risk_level,
            factors = ?risk.factors,
            "risk.computed"
        );
        Ok(Self { report, risk, detected })
    }
}

/// Details, banner export, insights, verdict and closing score.
pub fn present(
    out: &mut impl Write,
    address: &str,
    analysis: &Analysis,
    cfg: &Config,
    now: DateTime<Utc>,
) -> Result<()> {
    let Analysis { report, risk, detected } = analysis;

    render::write_details(out, address, report, *detected, cfg.report_tz)?;

    Banner::from_report(report, risk).write_to(&cfg.banner_path)?;
    writeln!(out, "\nToken analysis banner saved as {}", cfg.banner_path)?;

    render::write_insights(out, &render::insights(report, *detected, now))?;

    let verdict = render::recommendation(report);
    render::write_recommendation(out, verdict)?;
    if verdict == render::Recommendation::Caution {
        render::write_risk_flags(out, report)?;
    }

    render::write_summary(out, risk)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::safe_report;
    use crate::domain::Timestamp;
    use std::path::Path;

    fn config(banner: &Path) -> Config {
        Config {
            api_url: "http://localhost".into(),
            api_key: "k".into(),
            banner_path: banner.display().to_string(),
            report_tz: Some(chrono_tz::UTC),
            log_json: false,
        }
    }

    /// Same order as the binary: validate first, print second.
    fn analyze(
        out: &mut Vec<u8>,
        address: &str,
        report: TokenReport,
        cfg: &Config,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let analysis = Analysis::prepare(report)?;
        present(out, address, &analysis, cfg, now)
    }

    fn now() -> DateTime<Utc> {
        crate::time::parse_detected_at("2024-06-01T00:00:00Z").unwrap()
    }

    #[test]
    fn empty_holders_print_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let banner = dir.path().join("banner.svg");
        let mut report = safe_report();
        report.top_holders.clear();

        let mut buf = Vec::new();
        let err = analyze(&mut buf, "Mint111", report, &config(&banner), now()).unwrap_err();

        assert_eq!(err.downcast_ref::<ReportError>(), Some(&ReportError::NoHolders));
        assert!(buf.is_empty());
        assert!(!banner.exists());
    }

    #[test]
    fn empty_markets_or_bad_timestamp_print_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir.path().join("banner.svg"));

        let mut report = safe_report();
        report.markets.clear();
        let mut buf = Vec::new();
        assert!(analyze(&mut buf, "Mint111", report, &cfg, now()).is_err());
        assert!(buf.is_empty());

        let mut report = safe_report();
        report.detected_at = Some(Timestamp::Text("not a date".into()));
        let mut buf = Vec::new();
        assert!(analyze(&mut buf, "Mint111", report, &cfg, now()).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn full_report_and_banner_are_written() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let banner = dir.path().join("banner.svg");

        let mut buf = Vec::new();
        analyze(&mut buf, "Mint111", safe_report(), &config(&banner), now()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Safe Coin"));
        assert!(text.contains("Token analysis banner saved as"));
        assert!(text.contains("• Token has been around for 152 days."));
        assert!(text.contains("passed basic safety checks"));
        assert!(text.ends_with("Score: 0.00%\nRisk Level: Low\n"));
        assert!(std::fs::read_to_string(&banner).unwrap().contains("Symbol: SAFE"));
    }
}
