use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    pub bind_addr: String,
    pub time_zone: Tz,
    /// Window (days) scanned by the expiry notification check.
    pub expiry_notice_days: i64,
    /// Window (days) covered by the expiring-soon report.
    pub expiry_report_days: i64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow!("DATABASE_URL must be set (PostgreSQL connection string)"))?;

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string());

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "12".to_string())
            .parse()
            .unwrap_or(12);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let expiry_notice_days = env::var("EXPIRY_NOTICE_DAYS")
            .unwrap_or_else(|_| "90".to_string())
            .parse()
            .unwrap_or(90);

        let expiry_report_days = env::var("EXPIRY_REPORT_DAYS")
            .unwrap_or_else(|_| "180".to_string())
            .parse()
            .unwrap_or(180);

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            bind_addr,
            time_zone,
            expiry_notice_days,
            expiry_report_days,
        })
    }
}
