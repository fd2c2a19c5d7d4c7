use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::scoring::ScoringPolicy;

/// Configuration for the KIWZ trust engine service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Scoring policy configuration
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Enable request/response span logging
    pub log_requests: bool,
}

/// Configuration for the scoring policy.
///
/// Score weights and saturation constants are fixed by design and do not
/// appear here; only the monetary bases, the review cadence and the
/// investment gate are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base for the credit limit curve
    pub base_credit_limit: f64,
    /// Base for the investment limit curve
    pub base_investment_limit: f64,
    /// Base for the per-transaction limit curve
    pub base_transaction_limit: f64,
    /// Days until a computed score is due for review
    pub review_period_days: u32,
    /// Minimum investment maturity required to invest
    pub min_investment_maturity: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_credit_limit: 50_000.0,
            base_investment_limit: 100_000.0,
            base_transaction_limit: 25_000.0,
            review_period_days: 30,
            min_investment_maturity: 30,
        }
    }
}

impl ScoringConfig {
    /// Convert to a ScoringPolicy for use by the TrustEngine
    pub fn to_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            base_credit_limit: self.base_credit_limit,
            base_investment_limit: self.base_investment_limit,
            base_transaction_limit: self.base_transaction_limit,
            review_period_days: self.review_period_days,
            min_investment_maturity: self.min_investment_maturity,
        }
    }
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8083,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                log_requests: false,
            },
            scoring: ScoringConfig::default(),
        }
    }
}

impl TrustConfig {
    /// Load configuration from environment variables and validate
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Server configuration
        if let Ok(host) = env::var("KIWZ_TRUST_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = env::var("KIWZ_TRUST_PORT") {
            config.server.port = port.parse().context("Invalid KIWZ_TRUST_PORT value")?;
        }

        // Logging configuration
        if let Ok(level) = env::var("KIWZ_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(log_requests) = env::var("KIWZ_LOG_REQUESTS") {
            config.logging.log_requests = log_requests
                .parse()
                .context("Invalid KIWZ_LOG_REQUESTS value")?;
        }

        // Scoring policy configuration
        if let Ok(limit) = env::var("KIWZ_BASE_CREDIT_LIMIT") {
            config.scoring.base_credit_limit = limit
                .parse()
                .context("Invalid KIWZ_BASE_CREDIT_LIMIT value")?;
        }

        if let Ok(limit) = env::var("KIWZ_BASE_INVESTMENT_LIMIT") {
            config.scoring.base_investment_limit = limit
                .parse()
                .context("Invalid KIWZ_BASE_INVESTMENT_LIMIT value")?;
        }

        if let Ok(limit) = env::var("KIWZ_BASE_TRANSACTION_LIMIT") {
            config.scoring.base_transaction_limit = limit
                .parse()
                .context("Invalid KIWZ_BASE_TRANSACTION_LIMIT value")?;
        }

        if let Ok(days) = env::var("KIWZ_REVIEW_PERIOD_DAYS") {
            config.scoring.review_period_days = days
                .parse()
                .context("Invalid KIWZ_REVIEW_PERIOD_DAYS value")?;
        }

        if let Ok(maturity) = env::var("KIWZ_MIN_INVESTMENT_MATURITY") {
            config.scoring.min_investment_maturity = maturity
                .parse()
                .context("Invalid KIWZ_MIN_INVESTMENT_MATURITY value")?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(anyhow::anyhow!("Server host cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port must be non-zero"));
        }

        if self.scoring.base_credit_limit <= 0.0 {
            return Err(anyhow::anyhow!("Base credit limit must be positive"));
        }

        if self.scoring.base_investment_limit <= 0.0 {
            return Err(anyhow::anyhow!("Base investment limit must be positive"));
        }

        if self.scoring.base_transaction_limit <= 0.0 {
            return Err(anyhow::anyhow!("Base transaction limit must be positive"));
        }

        if self.scoring.review_period_days == 0 {
            return Err(anyhow::anyhow!("Review period must be at least one day"));
        }

        if self.scoring.min_investment_maturity > 100 {
            return Err(anyhow::anyhow!(
                "Minimum investment maturity cannot exceed 100 (sub-score bound)"
            ));
        }

        Ok(())
    }
}
