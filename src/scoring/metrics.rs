//! Input Metrics for Trust Scoring
//!
//! Aggregated activity snapshots supplied by external collaborators:
//! the transaction-history aggregator, the investment-history aggregator,
//! and the compliance subsystem. The scoring engine never fetches data
//! itself - callers supply a consistent snapshot.
//!
//! Upstream data is not trusted blindly: fractional and monetary fields
//! are clamped to their documented ranges at the scoring boundary, so
//! malformed aggregates cannot push scores out of band.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rolling-window transaction activity for one entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransactionMetrics {
    pub total_transactions: u64,
    pub successful_transactions: u64,
    pub failed_transactions: u64,

    /// Settled volume in the entity's settlement currency
    pub total_volume: f64,

    /// Informational only - not consumed by the current formulas
    pub average_transaction_size: f64,

    /// Fraction in [0,1]
    pub on_time_payment_rate: f64,

    pub late_payment_count: u64,
    pub default_count: u64,
}

impl TransactionMetrics {
    /// A copy with all fractional and monetary fields clamped to their
    /// documented ranges. Counts are non-negative by type.
    pub fn sanitized(&self) -> Self {
        Self {
            total_volume: clamp_money(self.total_volume),
            average_transaction_size: clamp_money(self.average_transaction_size),
            on_time_payment_rate: clamp_fraction(self.on_time_payment_rate),
            ..*self
        }
    }

    /// True when every field is already inside its documented range.
    ///
    /// `successful + failed <= total` is part of well-formedness but a
    /// violation is clamped (success rate capped at 1.0), not rejected.
    pub fn is_well_formed(&self) -> bool {
        in_fraction_range(self.on_time_payment_rate)
            && self.total_volume >= 0.0
            && self.average_transaction_size >= 0.0
            && self.successful_transactions + self.failed_transactions <= self.total_transactions
    }
}

impl Default for TransactionMetrics {
    fn default() -> Self {
        Self {
            total_transactions: 0,
            successful_transactions: 0,
            failed_transactions: 0,
            total_volume: 0.0,
            average_transaction_size: 0.0,
            on_time_payment_rate: 0.0,
            late_payment_count: 0,
            default_count: 0,
        }
    }
}

/// Self-reported risk appetite - informational classification only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Aggregated investment activity for one entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub total_investments: u64,

    pub total_invested_amount: f64,
    pub average_investment_size: f64,

    /// Spread across investment categories, fraction in [0,1]
    pub investment_diversification: f64,

    /// Signed fraction in [-1,1]
    pub profitability_score: f64,

    pub risk_tolerance: RiskTolerance,
}

impl InvestmentMetrics {
    /// A copy with all fractional and monetary fields clamped to their
    /// documented ranges.
    pub fn sanitized(&self) -> Self {
        Self {
            total_invested_amount: clamp_money(self.total_invested_amount),
            average_investment_size: clamp_money(self.average_investment_size),
            investment_diversification: clamp_fraction(self.investment_diversification),
            profitability_score: clamp_signed_fraction(self.profitability_score),
            ..*self
        }
    }

    pub fn is_well_formed(&self) -> bool {
        in_fraction_range(self.investment_diversification)
            && self.profitability_score >= -1.0
            && self.profitability_score <= 1.0
            && self.total_invested_amount >= 0.0
            && self.average_investment_size >= 0.0
    }
}

impl Default for InvestmentMetrics {
    fn default() -> Self {
        Self {
            total_investments: 0,
            total_invested_amount: 0.0,
            average_investment_size: 0.0,
            investment_diversification: 0.0,
            profitability_score: 0.0,
            risk_tolerance: RiskTolerance::Medium,
        }
    }
}

/// Category of compliance check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    Kyc,
    Aml,
    Sanctions,
    Regulatory,
}

/// Outcome of a compliance check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    Pending,
    Flagged,
}

/// One compliance check performed against an entity.
///
/// Created by the external compliance subsystem, immutable once created.
/// The scoring engine consumes these in bulk; order does not matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub entity_id: String,
    pub check_type: CheckType,
    pub status: CheckStatus,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

impl ComplianceRecord {
    pub fn new(
        entity_id: impl Into<String>,
        check_type: CheckType,
        status: CheckStatus,
        details: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            check_type,
            status,
            timestamp: Utc::now(),
            details: details.into(),
        }
    }
}

/// Clamp to [0,1]; NaN maps to 0
fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp to [-1,1]; NaN maps to 0
fn clamp_signed_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Clamp to >= 0; NaN maps to 0
fn clamp_money(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

fn in_fraction_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
