mod analysis;
mod banner;
mod config;
mod domain;
mod error;
mod logger;
mod render;
mod risk;
mod rugcheck;
mod time;

use anyhow::{anyhow, Result};
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::config::Config;
use crate::rugcheck::{normalize_address, RugcheckClient};

#[tokio::main]
async fn main() {
    // Load local .env if present
    let _ = dotenvy::dotenv();

    session(|key| std::env::var(key).ok(), &mut std::io::stdout(), &mut std::io::stderr()).await;
}

/// One analyzer run. Every failure, configuration included, is reported on
/// `err` and swallowed, so the process exit status never differs.
async fn session(get: impl Fn(&str) -> Option<String>, out: &mut impl Write, err: &mut impl Write) {
    let outcome = match Config::from_lookup(get) {
        Ok(cfg) => {
            logger::init_tracing(cfg.log_json);
            info!(?cfg, "boot");
            run(&cfg, out).await
        }
        Err(e) => {
            logger::init_tracing(false);
            Err(e)
        }
    };

    if let Err(e) = outcome {
        error!(error = %e, "analysis.failed");
        let _ = writeln!(err, "{} {e:#}", "Error:".red());
    }
}

async fn prompt_address(out: &mut impl Write) -> Result<String> {
    write!(out, "{}", "\nEnter Solana token address: ".cyan())?;
    out.flush()?;

    let mut line = String::new();
    let n = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    if n == 0 {
        return Err(anyhow!("no token address given (stdin closed)"));
    }
    normalize_address(&line)
}

/// prompt -> fetch (spinner) -> validate + score -> print.
async fn run(cfg: &Config, out: &mut impl Write) -> Result<()> {
    render::write_title(out, "Solana Token Analyzer")?;
    let address = prompt_address(out).await?;
    let client = RugcheckClient::new(cfg.api_url.clone(), cfg.api_key.clone());

    let pb = render::spinner("Analyzing token...")?;
    let prepared = match client.report(&address).await {
        Ok(report) => analysis::Analysis::prepare(report).map_err(anyhow::Error::from),
        Err(e) => Err(e.into()),
    };
    let prepared = match prepared {
        Ok(a) => {
            pb.finish_with_message(format!("{} {}", "✔".green(), "Analysis complete!".green()));
            a
        }
        Err(e) => {
            pb.abandon_with_message(format!("{} {}", "✖".red(), "Analysis failed".red()));
            return Err(e);
        }
    };

    analysis::present(out, &address, &prepared, cfg, chrono::Utc::now())
}
