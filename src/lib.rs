//! KIWZ Trust Engine
//!
//! Reputation scoring and dynamic limit derivation for entities in the
//! KIWZ financial protocol. Ingests per-entity transaction, investment
//! and compliance snapshots and derives a composite trust score, a risk
//! rating, a trust-level classification and three dynamic monetary
//! limits, plus eligibility checks consumed by order and investment
//! flows.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs       - Crate root with re-exports
//! ├── main.rs      - Server entrypoint
//! ├── config.rs    - Configuration management
//! ├── scoring/     - Reputation scoring engine
//! │   ├── metrics.rs     - Input metrics & boundary sanitization
//! │   ├── score.rs       - Scores, risk ratings, trust levels
//! │   ├── engine.rs      - Pure scoring computations & limit curves
//! │   ├── eligibility.rs - Transaction/investment gates
//! │   └── manager.rs     - Score cache & orchestration
//! └── api/         - HTTP API endpoints
//!     └── trust.rs       - Score, check and policy routes
//! ```

pub mod api;
pub mod config;
pub mod scoring;

// Re-export main types for convenience
pub use config::{LoggingConfig, ScoringConfig, ServerConfig, TrustConfig};
pub use scoring::{
    check_investment, check_transaction, compliance_score, investment_maturity, overall_score,
    payment_reliability, transaction_volume, CheckStatus, CheckType, ComplianceRecord,
    EligibilityDecision, EntityActivity, InvestmentMetrics, ReputationScore, RiskRating,
    RiskTolerance, ScoringPolicy, TransactionMetrics, TrustEngine, TrustLevel, TrustManager,
};
