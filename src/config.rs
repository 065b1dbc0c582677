use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub time_zone: Tz,
    pub daily_allowance_rate: f64,
    pub profit_margin: f64,
}

/// The constants the report pipeline needs. Passed into the core entry
/// functions explicitly; the services never read ambient environment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub time_zone: Tz,
    pub daily_allowance_rate: f64,
    pub profit_margin: f64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/fieldops".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "Asia/Bangkok".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let daily_allowance_rate = env::var("DAILY_ALLOWANCE_RATE")
            .unwrap_or_else(|_| "150".to_string())
            .parse()
            .unwrap_or(150.0);

        let profit_margin = env::var("PROFIT_MARGIN")
            .unwrap_or_else(|_| "0.3".to_string())
            .parse()
            .unwrap_or(0.3);

        Ok(Config {
            database_url,
            port,
            time_zone,
            daily_allowance_rate,
            profit_margin,
        })
    }

    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            time_zone: self.time_zone,
            daily_allowance_rate: self.daily_allowance_rate,
            profit_margin: self.profit_margin,
        }
    }
}

#[cfg(test)]
impl ReportConfig {
    /// Bangkok timezone with the production default constants.
    pub fn test_default() -> Self {
        ReportConfig {
            time_zone: "Asia/Bangkok".parse().unwrap(),
            daily_allowance_rate: 150.0,
            profit_margin: 0.3,
        }
    }
}
