//! Reputation Score Types, Risk Ratings and Trust Levels
//!
//! A `ReputationScore` is a value, not an entity: the only way to change
//! one is to recompute it from fresh input metrics. The risk rating is a
//! pure function of the overall score, and the trust level is a pure
//! function of the risk rating - there is no independent mutation path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bond-style ordinal rating derived from the overall score.
///
/// Ordering follows credit-rating convention: AAA is best, D is worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    AAA,
    AA,
    A,
    BBB,
    BB,
    B,
    CCC,
    CC,
    C,
    D,
}

impl RiskRating {
    /// Map an overall score in [0,1000] onto the rating ladder.
    ///
    /// Strict descending thresholds, first match wins.
    pub fn from_overall_score(overall_score: u32) -> Self {
        match overall_score {
            s if s >= 900 => RiskRating::AAA,
            s if s >= 850 => RiskRating::AA,
            s if s >= 800 => RiskRating::A,
            s if s >= 750 => RiskRating::BBB,
            s if s >= 700 => RiskRating::BB,
            s if s >= 650 => RiskRating::B,
            s if s >= 600 => RiskRating::CCC,
            s if s >= 550 => RiskRating::CC,
            s if s >= 500 => RiskRating::C,
            _ => RiskRating::D,
        }
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskRating::AAA => "AAA",
            RiskRating::AA => "AA",
            RiskRating::A => "A",
            RiskRating::BBB => "BBB",
            RiskRating::BB => "BB",
            RiskRating::B => "B",
            RiskRating::CCC => "CCC",
            RiskRating::CC => "CC",
            RiskRating::C => "C",
            RiskRating::D => "D",
        };
        write!(f, "{}", label)
    }
}

/// Coarse five-value classification gating allowed actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustLevel {
    Verified,
    Trusted,
    Monitored,
    Restricted,
    Suspended,
}

impl From<RiskRating> for TrustLevel {
    /// Many-to-one mapping; total over all ten ratings, no default arm.
    fn from(rating: RiskRating) -> Self {
        match rating {
            RiskRating::AAA | RiskRating::AA => TrustLevel::Verified,
            RiskRating::A | RiskRating::BBB => TrustLevel::Trusted,
            RiskRating::BB | RiskRating::B => TrustLevel::Monitored,
            RiskRating::CCC | RiskRating::CC => TrustLevel::Restricted,
            RiskRating::C | RiskRating::D => TrustLevel::Suspended,
        }
    }
}

impl TrustLevel {
    pub fn is_suspended(&self) -> bool {
        matches!(self, TrustLevel::Suspended)
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, TrustLevel::Restricted)
    }
}

/// Full reputation snapshot for one entity, recomputed on demand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationScore {
    pub entity_id: String,
    pub entity_name: String,

    /// Weighted composite in [0,1000]
    pub overall_score: u32,

    /// Sub-scores, each in [0,100]
    pub payment_reliability: u32,
    pub investment_maturity: u32,
    pub transaction_volume: u32,
    pub compliance_score: u32,

    pub risk_rating: RiskRating,
    pub trust_level: TrustLevel,

    /// Dynamic monetary limits, each derived from a different score
    pub credit_limit: f64,
    pub investment_limit: f64,
    pub transaction_limit: f64,

    pub last_updated: DateTime<Utc>,
    pub next_review_date: DateTime<Utc>,
}

impl ReputationScore {
    /// Whether the snapshot has passed its scheduled review date
    pub fn is_due_for_review(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review_date
    }
}
