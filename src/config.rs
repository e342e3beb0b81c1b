use anyhow::{anyhow, Result};

#[derive(Clone)]
pub struct Config {
    // Rugcheck API
    pub api_url: String,
    pub api_key: String,

    // Output
    pub banner_path: String,
    pub report_tz: Option<chrono_tz::Tz>,

    // Logging
    pub log_json: bool,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("banner_path", &self.banner_path)
            .field("report_tz", &self.report_tz)
            .field("log_json", &self.log_json)
            .finish()
    }
}

pub const DEFAULT_API_URL: &str = "https://api.rugcheck.xyz/v1/tokens";
pub const DEFAULT_BANNER_PATH: &str = "token_analysis_banner.svg";

fn parse_bool(raw: Option<String>, default: bool) -> bool {
    match raw.map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = non_empty(get("RUGCHECK_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_key =
            non_empty(get("RUGCHECK_API_KEY")).ok_or_else(|| anyhow!("RUGCHECK_API_KEY is required"))?;

        let banner_path = non_empty(get("BANNER_PATH")).unwrap_or_else(|| DEFAULT_BANNER_PATH.to_string());

        let report_tz = match non_empty(get("REPORT_TZ")) {
            None => None,
            Some(tz) => Some(
                tz.parse::<chrono_tz::Tz>()
                    .map_err(|_| anyhow!("invalid REPORT_TZ: {tz}"))?,
            ),
        };

        let log_json = parse_bool(get("LOG_JSON"), false);

        Ok(Self {
            api_url,
            api_key,
            banner_path,
            report_tz,
            log_json,
        })
    }
}
