//! HTTP API for the KIWZ Trust Engine
//!
//! Provides REST endpoints for:
//! - Score submission and lookup (dashboards, admin views)
//! - Transaction/investment eligibility checks (order flows)
//! - Scoring policy governance

pub mod trust;

pub use trust::{create_trust_router, TrustApiState};
