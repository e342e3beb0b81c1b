use anyhow::{bail, Result};
use std::{fs, path::Path};
use tracing::info;

use crate::domain::TokenReport;
use crate::render::format_number;
use crate::risk::{RiskAssessment, Severity};

const TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="400" viewBox="0 0 800 400">
  <rect width="100%" height="100%" fill="#f0f0f0"/>
  <text x="400" y="50" font-family="Arial, sans-serif" font-size="24" text-anchor="middle" font-weight="bold">Solana Token Analysis Result</text>

  <text x="50" y="100" font-family="Arial, sans-serif" font-size="18">Token Name: {TOKEN_NAME}</text>
  <text x="50" y="130" font-family="Arial, sans-serif" font-size="18">Symbol: {TOKEN_SYMBOL}</text>
  <text x="50" y="160" font-family="Arial, sans-serif" font-size="18">Total Supply: {TOTAL_SUPPLY}</text>

  <text x="50" y="210" font-family="Arial, sans-serif" font-size="18" font-weight="bold">Risk Assessment:</text>
  <text x="70" y="240" font-family="Arial, sans-serif" font-size="24" fill="{RISK_COLOR}">Risk Score: {RISK_SCORE}%</text>
  <text x="70" y="280" font-family="Arial, sans-serif" font-size="24" fill="{RISK_COLOR}">Risk Level: {RISK_LEVEL}</text>

  <text x="50" y="330" font-family="Arial, sans-serif" font-size="18">Total Market Liquidity: {MARKET_LIQUIDITY}</text>
  <text x="50" y="360" font-family="Arial, sans-serif" font-size="18">LP Tokens Locked: {LP_LOCKED}%</text>

  <text x="790" y="390" font-family="Arial, sans-serif" font-size="12" text-anchor="end">Created by Solana Token Analyzer</text>
</svg>
"##;

pub fn severity_fill(severity: Severity) -> &'static str {
    match severity {
        Severity::Safe => "#2e7d32",
        Severity::Warning => "#f9a825",
        Severity::Danger => "#c62828",
        Severity::Critical => "#8b0000",
    }
}

/// Values substituted into the summary graphic, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub token_name: String,
    pub token_symbol: String,
    pub total_supply: String,
    pub risk_score: String,
    pub risk_level: String,
    pub risk_color: &'static str,
    pub market_liquidity: String,
    pub lp_locked: String,
}

impl Banner {
    pub fn from_report(report: &TokenReport, risk: &RiskAssessment) -> Self {
        Self {
            token_name: report.token_meta.name.clone(),
            token_symbol: report.token_meta.symbol.clone(),
            total_supply: format_number(report.normalized_supply()),
            risk_score: format!("{:.2}", risk.risk_score),
            risk_level: risk.risk_level.to_string(),
            risk_color: severity_fill(risk.severity()),
            market_liquidity: format!("${}", format_number(report.total_market_liquidity)),
            lp_locked: report
                .lp_locked_pct()
                .map_or_else(|| "N/A".to_string(), |p| format!("{p:.2}")),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("{TOKEN_NAME}", self.token_name.as_str()),
            ("{TOKEN_SYMBOL}", self.token_symbol.as_str()),
            ("{TOTAL_SUPPLY}", self.total_supply.as_str()),
            ("{RISK_SCORE}", self.risk_score.as_str()),
            ("{RISK_LEVEL}", self.risk_level.as_str()),
            ("{RISK_COLOR}", self.risk_color),
            ("{MARKET_LIQUIDITY}", self.market_liquidity.as_str()),
            ("{LP_LOCKED}", self.lp_locked.as_str()),
        ]
    }

    /// Fills every placeholder in the template; each field is written once
    /// per occurrence and never re-scanned, so values containing braces are
    /// left alone.
    pub fn render(&self) -> Result<String> {
        let fields = self.fields();
        let mut out = String::with_capacity(TEMPLATE.len() + 256);
        let mut rest = TEMPLATE;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let Some(end) = tail.find('}') else {
                bail!("unterminated placeholder in banner template");
            };
            let token = &tail[..=end];
            let Some((_, value)) = fields.iter().find(|(name, _)| *name == token) else {
                bail!("unknown banner placeholder {token}");
            };
            out.push_str(&xml_escape(value));
            rest = &tail[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Overwrites `path` with the rendered graphic.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let svg = self.render()?;
        fs::write(path.as_ref(), svg)?;
        info!(path = %path.as_ref().display(), "banner.written");
        Ok(())
    }
}

fn xml_escape(raw: &str) -> String {
    let mut s = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            c => s.push(c),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::safe_report;
    use crate::risk::compute_risk;

    #[test]
    fn renders_all_fields_without_leftovers() {
        let report = safe_report();
        let risk = compute_risk(&report).unwrap();
        let svg = Banner::from_report(&report, &risk).render().unwrap();

        assert!(svg.contains("Token Name: Safe Coin"));
        assert!(svg.contains("Symbol: SAFE"));
        assert!(svg.contains("Total Supply: 1,000,000"));
        assert!(svg.contains("Risk Score: 0.00%"));
        assert!(svg.contains("Risk Level: Low"));
        assert!(svg.contains("fill=\"#2e7d32\""));
        assert!(svg.contains("Total Market Liquidity: $200,000"));
        assert!(svg.contains("LP Tokens Locked: 99.00%"));
        for token in ["{TOKEN_NAME}", "{RISK_SCORE}", "{RISK_COLOR}", "{LP_LOCKED}"] {
            assert!(!svg.contains(token));
        }
    }

    #[test]
    fn missing_lp_renders_na() {
        let mut report = safe_report();
        report.markets[0].lp = None;
        let risk = compute_risk(&report).unwrap();
        let banner = Banner::from_report(&report, &risk);
        assert_eq!(banner.lp_locked, "N/A");
        assert!(banner.render().unwrap().contains("LP Tokens Locked: N/A%"));
    }

    #[test]
    fn values_are_escaped_and_not_rescanned() {
        let mut report = safe_report();
        report.token_meta.name = "<Rug & {TOKEN_SYMBOL}>".into();
        let risk = compute_risk(&report).unwrap();
        let svg = Banner::from_report(&report, &risk).render().unwrap();
        assert!(svg.contains("Token Name: &lt;Rug &amp; {TOKEN_SYMBOL}&gt;"));
        assert!(svg.contains("Symbol: SAFE"));
    }

    #[test]
    fn writes_file_overwriting_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token_analysis_banner.svg");
        fs::write(&path, "stale").unwrap();

        let report = safe_report();
        let risk = compute_risk(&report).unwrap();
        Banner::from_report(&report, &risk).write_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
        assert!(written.contains("Safe Coin"));
        assert!(!written.contains("stale"));
    }
}
