//! Eligibility Gates for Monetary Actions
//!
//! Order/investment flows consult these guards before permitting an
//! action. Denial is an ordinary return value, never an error - the
//! engine has no failure taxonomy. Rules are evaluated in order and the
//! first failing rule wins.

use serde::{Deserialize, Serialize};

use crate::scoring::score::ReputationScore;

/// Fraction of the transaction limit available to Restricted entities
const RESTRICTED_LIMIT_FACTOR: f64 = 0.5;

/// Outcome of an eligibility check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl EligibilityDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Whether the entity may perform a transaction of the given amount.
///
/// Restricted entities get an additional half-limit cap layered on top
/// of the base limit check.
pub fn check_transaction(score: &ReputationScore, amount: f64) -> EligibilityDecision {
    if score.trust_level.is_suspended() {
        return EligibilityDecision::deny("Account suspended due to compliance issues");
    }

    if amount > score.transaction_limit {
        return EligibilityDecision::deny(format!(
            "Amount exceeds transaction limit of {}",
            score.transaction_limit
        ));
    }

    if score.trust_level.is_restricted() {
        let restricted_limit = score.transaction_limit * RESTRICTED_LIMIT_FACTOR;
        if amount > restricted_limit {
            return EligibilityDecision::deny(format!(
                "Restricted accounts are limited to {} per transaction",
                restricted_limit
            ));
        }
    }

    EligibilityDecision::allow()
}

/// Whether the entity may make an investment of the given amount.
///
/// The maturity gate is independent of trust level: even a Verified
/// entity with no investment history is blocked.
pub fn check_investment(
    score: &ReputationScore,
    amount: f64,
    min_investment_maturity: u32,
) -> EligibilityDecision {
    if score.trust_level.is_suspended() {
        return EligibilityDecision::deny("Account suspended due to compliance issues");
    }

    if amount > score.investment_limit {
        return EligibilityDecision::deny(format!(
            "Amount exceeds investment limit of {}",
            score.investment_limit
        ));
    }

    if score.investment_maturity < min_investment_maturity {
        return EligibilityDecision::deny(format!(
            "Insufficient investment history. Minimum maturity score: {}",
            min_investment_maturity
        ));
    }

    EligibilityDecision::allow()
}
