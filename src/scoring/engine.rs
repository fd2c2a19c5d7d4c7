//! Trust Scoring Engine
//!
//! Pure, synchronous scoring: no I/O, no shared state, bounded time
//! (linear in compliance-record count). All rounding uses `f64::round`,
//! half away from zero, which on the non-negative scoring domain matches
//! round-half-up.
//!
//! ## Score Model
//!
//! - Four sub-scores in [0,100], each from a weighted blend of bounded
//!   factors. Entities with no history receive neutral priors instead of
//!   a degenerate 0 or 100.
//! - Overall score: 30/25/25/20 weighted composite of the sub-scores,
//!   projected onto [0,1000].
//! - Dynamic limits grow convexly with their driving score: doubling the
//!   score more than doubles the limit.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::metrics::{CheckStatus, ComplianceRecord, InvestmentMetrics, TransactionMetrics};
use crate::scoring::score::{ReputationScore, RiskRating, TrustLevel};

/// Neutral prior for entities with no transaction history
const PAYMENT_PRIOR: u32 = 50;

/// Prior for entities with no investment history. Lower than the payment
/// prior: missing investment history reads moderately negative.
const MATURITY_PRIOR: u32 = 30;

/// Neutral-positive prior for entities with no compliance checks on file
const COMPLIANCE_PRIOR: u32 = 70;

/// Points lost per recorded default, from a 100-point base
const DEFAULT_PENALTY_STEP: f64 = 20.0;

/// Points lost per failed compliance check
const FAIL_PENALTY: f64 = 15.0;

/// Points lost per flagged compliance check
const FLAG_PENALTY: f64 = 10.0;

/// Settled volume at which the volume factor saturates. Design constant,
/// not configurable.
const VOLUME_SATURATION: f64 = 10_000.0;

/// Transaction count at which the frequency factor saturates
const FREQUENCY_SATURATION: f64 = 100.0;

/// Investment count at which the count factor saturates
const INVESTMENT_COUNT_SATURATION: f64 = 10.0;

/// Projects the [0,100] weighted blend onto the [0,1000] overall range
const OVERALL_SCALE: f64 = 10.0;

/// Governance-configurable scoring policy.
///
/// Saturation constants and score weights are fixed by design; only the
/// monetary bases, the review cadence and the investment gate are policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Base for the credit limit curve
    pub base_credit_limit: f64,

    /// Base for the investment limit curve
    pub base_investment_limit: f64,

    /// Base for the per-transaction limit curve
    pub base_transaction_limit: f64,

    /// Days until a computed score is due for review
    pub review_period_days: u32,

    /// Minimum investment maturity required to invest at all
    pub min_investment_maturity: u32,
}

impl Default for ScoringPolicy {
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

/// Payment reliability sub-score in [0,100].
///
/// 40/40/20 blend of success rate, on-time rate and a default penalty.
/// The success rate is capped at 1.0 so over-reported success counts
/// cannot push the score past its bound.
pub fn payment_reliability(metrics: &TransactionMetrics) -> u32 {
    let m = metrics.sanitized();
    if m.total_transactions == 0 {
        return PAYMENT_PRIOR;
    }

    let success_rate =
        (m.successful_transactions as f64 / m.total_transactions as f64).min(1.0);
    let default_penalty = (100.0 - m.default_count as f64 * DEFAULT_PENALTY_STEP).max(0.0);

    let blended = success_rate * 100.0 * 0.4
        + m.on_time_payment_rate * 100.0 * 0.4
        + default_penalty * 0.2;
    blended.round() as u32
}

/// Investment maturity sub-score in [0,100].
///
/// Count caps out at 10+ investments (30 pts), diversification adds up to
/// 30 pts, and profitability is remapped from [-1,1] to [0,1] before
/// scaling to 40 pts.
pub fn investment_maturity(metrics: &InvestmentMetrics) -> u32 {
    let m = metrics.sanitized();
    if m.total_investments == 0 {
        return MATURITY_PRIOR;
    }

    let count_component =
        (m.total_investments as f64 / INVESTMENT_COUNT_SATURATION).min(1.0) * 30.0;
    let diversification_component = m.investment_diversification * 30.0;
    let profitability_component = (m.profitability_score + 1.0) / 2.0 * 40.0;

    (count_component + diversification_component + profitability_component).round() as u32
}

/// Transaction volume sub-score in [0,100].
///
/// 60/40 blend of settled volume and transaction frequency, each
/// saturating at its design constant.
pub fn transaction_volume(metrics: &TransactionMetrics) -> u32 {
    let m = metrics.sanitized();

    let volume_score = (m.total_volume / VOLUME_SATURATION).min(1.0) * 100.0;
    let frequency_score = (m.total_transactions as f64 / FREQUENCY_SATURATION).min(1.0) * 100.0;

    (volume_score * 0.6 + frequency_score * 0.4).round() as u32
}

/// Compliance sub-score in [0,100].
///
/// Pass rate minus per-failure and per-flag penalties, floored at 0.
/// Pending records count toward the total but contribute to neither the
/// pass rate numerator nor the penalties - they dilute the pass rate.
pub fn compliance_score(records: &[ComplianceRecord]) -> u32 {
    if records.is_empty() {
        return COMPLIANCE_PRIOR;
    }

    let total = records.len() as f64;
    let passed = records
        .iter()
        .filter(|r| r.status == CheckStatus::Passed)
        .count() as f64;
    let failed = records
        .iter()
        .filter(|r| r.status == CheckStatus::Failed)
        .count() as f64;
    let flagged = records
        .iter()
        .filter(|r| r.status == CheckStatus::Flagged)
        .count() as f64;

    let pass_rate = passed / total * 100.0;
    let raw = pass_rate - failed * FAIL_PENALTY - flagged * FLAG_PENALTY;
    raw.round().max(0.0) as u32
}

/// Weighted composite of the four sub-scores, projected onto [0,1000]
pub fn overall_score(
    payment_reliability: u32,
    investment_maturity: u32,
    transaction_volume: u32,
    compliance_score: u32,
) -> u32 {
    let blended = payment_reliability as f64 * 0.30
        + investment_maturity as f64 * 0.25
        + transaction_volume as f64 * 0.25
        + compliance_score as f64 * 0.20;
    (blended * OVERALL_SCALE).round() as u32
}

/// The scoring engine: the pure computations above plus the policy-driven
/// limit curves and snapshot assembly.
#[derive(Debug, Clone, Default)]
pub struct TrustEngine {
    policy: ScoringPolicy,
}

impl TrustEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Replace the scoring policy (governance action)
    pub fn set_policy(&mut self, policy: ScoringPolicy) {
        self.policy = policy;
    }

    /// Credit limit from the overall score: base * m * (1 + m/2), m in [0,1]
    pub fn credit_limit(&self, overall_score: u32) -> f64 {
        let m = overall_score as f64 / 1000.0;
        (self.policy.base_credit_limit * m * (1.0 + m * 0.5)).round()
    }

    /// Investment limit from the maturity sub-score: base * m * (1 + 0.3m)
    pub fn investment_limit(&self, investment_maturity: u32) -> f64 {
        let m = investment_maturity as f64 / 100.0;
        (self.policy.base_investment_limit * m * (1.0 + m * 0.3)).round()
    }

    /// Per-transaction limit from the reliability sub-score: base * m * (1 + 0.4m)
    pub fn transaction_limit(&self, payment_reliability: u32) -> f64 {
        let m = payment_reliability as f64 / 100.0;
        (self.policy.base_transaction_limit * m * (1.0 + m * 0.4)).round()
    }

    /// Compute a full reputation snapshot stamped with the current time
    pub fn score_entity(
        &self,
        entity_id: &str,
        entity_name: &str,
        transactions: &TransactionMetrics,
        investments: &InvestmentMetrics,
        compliance: &[ComplianceRecord],
    ) -> ReputationScore {
        self.score_entity_at(
            entity_id,
            entity_name,
            transactions,
            investments,
            compliance,
            Utc::now(),
        )
    }

    /// Compute a full reputation snapshot against an explicit clock
    /// instant. Deterministic: identical inputs and instant yield an
    /// identical snapshot.
    pub fn score_entity_at(
        &self,
        entity_id: &str,
        entity_name: &str,
        transactions: &TransactionMetrics,
        investments: &InvestmentMetrics,
        compliance: &[ComplianceRecord],
        now: DateTime<Utc>,
    ) -> ReputationScore {
        let payment = payment_reliability(transactions);
        let maturity = investment_maturity(investments);
        let volume = transaction_volume(transactions);
        let compliance = compliance_score(compliance);
        let overall = overall_score(payment, maturity, volume, compliance);

        let risk_rating = RiskRating::from_overall_score(overall);
        let trust_level = TrustLevel::from(risk_rating);

        ReputationScore {
            entity_id: entity_id.to_string(),
            entity_name: entity_name.to_string(),
            overall_score: overall,
            payment_reliability: payment,
            investment_maturity: maturity,
            transaction_volume: volume,
            compliance_score: compliance,
            risk_rating,
            trust_level,
            credit_limit: self.credit_limit(overall),
            investment_limit: self.investment_limit(maturity),
            transaction_limit: self.transaction_limit(payment),
            last_updated: now,
            next_review_date: now + Duration::days(self.policy.review_period_days as i64),
        }
    }
}
