//! Reputation Scoring for the KIWZ Protocol
//!
//! Derives a composite trust score, risk rating, trust level and dynamic
//! transaction limits from an entity's activity history, and gates
//! monetary actions on the result.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ TransactionMetrics│     │                  │     │ ReputationScore  │
//! │ InvestmentMetrics │────►│   TrustEngine    │────►│ (rating, trust   │
//! │ ComplianceRecords │     │ (pure scoring)   │     │  level, limits)  │
//! └──────────────────┘     └──────────────────┘     └────────┬─────────┘
//!                                  ▲                          │
//!                                  │                          ▼
//!                          ┌──────────────────┐     ┌──────────────────┐
//!                          │   TrustManager   │     │ Eligibility gates│
//!                          │ (cache, reviews) │     │ (txn / invest)   │
//!                          └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Score Model
//!
//! - Four sub-scores in [0,100]: payment reliability, investment
//!   maturity, transaction volume, compliance
//! - Overall score in [0,1000]: 30/25/25/20 weighted composite
//! - Risk rating AAA..D from a strict threshold ladder, trust level
//!   (Verified..Suspended) from the rating
//! - Credit, investment and transaction limits grow convexly with their
//!   driving score
//!
//! Scores are values: recomputation is the only mutation path.

mod eligibility;
mod engine;
mod manager;
mod metrics;
mod score;

pub use eligibility::{check_investment, check_transaction, EligibilityDecision};
pub use engine::{
    compliance_score, investment_maturity, overall_score, payment_reliability,
    transaction_volume, ScoringPolicy, TrustEngine,
};
pub use manager::{EntityActivity, TrustManager};
pub use metrics::{
    CheckStatus, CheckType, ComplianceRecord, InvestmentMetrics, RiskTolerance,
    TransactionMetrics,
};
pub use score::{ReputationScore, RiskRating, TrustLevel};
