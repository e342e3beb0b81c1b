//! Terminal rendering of a token report.
//!
//! Everything writes to an `io::Write` so the report can be captured. Colour
//! comes from `colored`, which honours `NO_COLOR` / `CLICOLOR_FORCE`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Color, Style, Width};
use tabled::{Table, Tabled};

use crate::domain::TokenReport;
use crate::risk::{RiskAssessment, SummaryBand};
use crate::time::{age_days, format_created, NEW_TOKEN_DAYS};

const MAX_HOLDER_ROWS: usize = 10;

/// en-US grouping, at most two fraction digits, trailing zeros trimmed.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let rounded = (n.abs() * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    let (int, frac) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), ""),
    };
    let frac = frac.trim_end_matches('0');

    let mut grouped = String::with_capacity(int.len() + int.len() / 3 + 4);
    if n < 0.0 && rounded != 0.0 {
        grouped.push('-');
    }
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

fn paint_band(text: &str, band: SummaryBand) -> ColoredString {
    match band {
        SummaryBand::Calm => text.green(),
        SummaryBand::Elevated => text.yellow(),
        SummaryBand::Alarming => text.red(),
    }
}

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn property(name: &str, value: impl ToString) -> PropertyRow {
    PropertyRow { property: name.to_string(), value: value.to_string() }
}

#[derive(Tabled)]
struct HolderRow {
    #[tabled(rename = "Rank")]
    rank: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Percentage")]
    percentage: String,
}

/// Pins each column to a fixed outer width (one space of padding per side);
/// longer cells are cut with an ellipsis.
fn fixed_table<T: Tabled>(rows: impl IntoIterator<Item = T>, widths: &[usize]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    for (i, w) in widths.iter().enumerate() {
        let inner = w.saturating_sub(2);
        table.modify(Columns::single(i), Width::truncate(inner).suffix("…"));
        table.modify(Columns::single(i), Width::increase(inner));
    }
    if colored::control::SHOULD_COLORIZE.should_colorize() {
        table.modify(Rows::first(), Color::FG_CYAN);
    }
    table.to_string()
}

/// Spinner for the fetch; drawn on stderr and ticked by hand, no background
/// thread.
pub fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.tick();
    Ok(pb)
}

pub fn write_title(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    let bar = "═".repeat(title.chars().count() + 4);
    writeln!(out, "{}", format!("╔{bar}╗").magenta())?;
    writeln!(out, "{}", format!("║  {}  ║", title).magenta().bold())?;
    writeln!(out, "{}", format!("╚{bar}╝").magenta())
}

/// Identity table, liquidity, holders, market and verification sections.
pub fn write_details(
    out: &mut impl Write,
    address: &str,
    report: &TokenReport,
    detected: Option<DateTime<Utc>>,
    tz: Option<chrono_tz::Tz>,
) -> Result<()> {
    writeln!(out)?;
    write_title(out, "Token Analysis")?;

    let created = detected.map_or_else(|| "N/A".to_string(), |d| format_created(d, tz));
    let info = [
        property("Name", report.token_meta.name.bold()),
        property("Symbol", report.token_meta.symbol.bold()),
        property("Address", address.bright_black()),
        property("Total Supply", format_number(report.normalized_supply()).yellow()),
        property("Decimals", report.token.decimals),
        property("Created", created),
    ];
    writeln!(out, "{}", fixed_table(info, &[20, 50]))?;

    writeln!(out, "\n{}", "Liquidity Information:".bold())?;
    writeln!(
        out,
        "Total Market Liquidity: {}",
        format!("${}", format_number(report.total_market_liquidity)).green()
    )?;

    writeln!(out, "\n{}", "Top Token Holders:".bold())?;
    let holders = report.top_holders.iter().take(MAX_HOLDER_ROWS).enumerate().map(|(i, h)| HolderRow {
        rank: (i + 1).to_string(),
        address: h.address.bright_black().to_string(),
        amount: format_number(h.ui_amount),
        percentage: format!("{:.2}%", h.pct).yellow().to_string(),
    });
    writeln!(out, "{}", fixed_table(holders, &[10, 45, 20, 15]))?;

    if let Some(market) = report.primary_market() {
        writeln!(out, "\n{}", "Market Information:".bold())?;
        writeln!(out, "Exchange: {}", market.market_type.as_deref().unwrap_or("unknown").yellow())?;
        writeln!(out, "Pair: {}", format!("{}/SOL", report.token_meta.symbol).yellow())?;
        writeln!(out, "LP Token: {}", market.mint_lp.as_deref().unwrap_or("N/A").bright_black())?;

        if let Some(lp) = &market.lp {
            writeln!(out, "\n{}", "LP Token Information:".bold())?;
            writeln!(out, "Total LP Providers: {}", report.total_lp_providers.to_string().yellow())?;
            writeln!(out, "LP Tokens Locked: {}", format!("{:.2}%", lp.lp_locked_pct).green())?;
            writeln!(
                out,
                "LP Locked USD Value: {}",
                format!("${}", format_number(lp.lp_locked_usd)).green()
            )?;
        }
    }

    writeln!(out, "\n{}", "Verification Status:".bold())?;
    let verified = if report.jup_verified() { "Yes".green() } else { "No".red() };
    writeln!(out, "Jupiter Verified: {verified}")?;

    let links = report.links();
    if !links.is_empty() {
        writeln!(out, "\n{}", "Social Links:".bold())?;
        for link in links {
            writeln!(out, "{}: {}", link.provider.cyan(), link.value.blue().underline())?;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Insight {
    Renounced,
    NotRenounced,
    NoTransferFee,
    TransferFee(f64),
    NewToken { days: f64 },
    Established { days: f64 },
}

impl Insight {
    pub fn message(&self) -> String {
        match self {
            Insight::Renounced => "• Token contract is renounced (no mint or freeze authority)".into(),
            Insight::NotRenounced => "• Token contract is not renounced. Be cautious.".into(),
            Insight::NoTransferFee => "• No transfer fees".into(),
            Insight::TransferFee(pct) => format!("• Transfer fee: {pct}%"),
            Insight::NewToken { days } => {
                format!("• Token is relatively new ({days:.0} days old). Exercise caution.")
            }
            Insight::Established { days } => format!("• Token has been around for {days:.0} days."),
        }
    }

    pub fn is_caution(&self) -> bool {
        matches!(self, Insight::NotRenounced | Insight::TransferFee(_) | Insight::NewToken { .. })
    }
}

/// Non-scored observations; none of these feed the risk score. The age note
/// is skipped when the creation time is unknown.
pub fn insights(report: &TokenReport, detected: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Vec<Insight> {
    let mut out = Vec::with_capacity(3);

    out.push(if report.is_renounced() { Insight::Renounced } else { Insight::NotRenounced });

    let fee = report.transfer_fee_pct();
    out.push(if fee == 0.0 { Insight::NoTransferFee } else { Insight::TransferFee(fee) });

    if let Some(detected) = detected {
        let days = age_days(detected, now);
        out.push(if days < NEW_TOKEN_DAYS {
            Insight::NewToken { days }
        } else {
            Insight::Established { days }
        });
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Danger,
    Caution,
    Passed,
}

/// Rugged beats flagged risks beats a clean pass.
pub fn recommendation(report: &TokenReport) -> Recommendation {
    if report.rugged {
        Recommendation::Danger
    } else if report.has_risk_flags() {
        Recommendation::Caution
    } else {
        Recommendation::Passed
    }
}

impl Recommendation {
    pub fn message(self) -> &'static str {
        match self {
            Recommendation::Danger => "DANGER: This token has been flagged as rugged. Do not invest!",
            Recommendation::Caution => {
                "CAUTION: This token has some risk factors. Invest with extreme caution."
            }
            Recommendation::Passed => {
                "This token appears to have passed basic safety checks. However, always do your own research before investing."
            }
        }
    }
}

pub fn write_insights(out: &mut impl Write, insights: &[Insight]) -> std::io::Result<()> {
    writeln!(out, "\n{}", "Additional Insights:".bold())?;
    for i in insights {
        let msg = i.message();
        if i.is_caution() {
            writeln!(out, "{}", msg.yellow())?;
        } else {
            writeln!(out, "{}", msg.green())?;
        }
    }
    Ok(())
}

pub fn write_recommendation(out: &mut impl Write, rec: Recommendation) -> std::io::Result<()> {
    writeln!(out, "\n{}", "Final Recommendation:".bold().underline())?;
    let msg = match rec {
        Recommendation::Danger => rec.message().red().bold(),
        Recommendation::Caution => rec.message().yellow(),
        Recommendation::Passed => rec.message().green(),
    };
    writeln!(out, "{msg}")
}

/// Lists upstream risk flags beneath a caution verdict.
pub fn write_risk_flags(out: &mut impl Write, report: &TokenReport) -> std::io::Result<()> {
    let Some(flags) = report.risks.as_deref() else {
        return Ok(());
    };
    for flag in flags {
        let label = match flag.level.as_deref() {
            Some("danger") => flag.name.red(),
            _ => flag.name.yellow(),
        };
        match flag.description.as_deref().filter(|d| !d.is_empty()) {
            Some(desc) => writeln!(out, "  - {label}: {desc}")?,
            None => writeln!(out, "  - {label}")?,
        }
    }
    Ok(())
}

/// Closing echo, coloured by the 40/60 summary band.
pub fn write_summary(out: &mut impl Write, risk: &RiskAssessment) -> std::io::Result<()> {
    let band = risk.summary_band();
    let score = format!("{:.2}", risk.risk_score);
    writeln!(out, "\n")?;
    writeln!(out, "{}{}", "Score: ".bold(), format!("{}%", paint_band(&score, band)).bold())?;
    writeln!(
        out,
        "{}{}",
        "Risk Level: ".bold(),
        paint_band(risk.risk_level.label(), band).bold()
    )
}
