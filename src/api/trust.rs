//! Trust API Endpoints
//!
//! Score submission and lookup for dashboards, eligibility checks for
//! order/investment flows, and policy governance.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::scoring::{
    EligibilityDecision, EntityActivity, ReputationScore, ScoringPolicy, TrustManager,
};

/// API state for trust endpoints
#[derive(Clone)]
pub struct TrustApiState {
    pub manager: Arc<RwLock<TrustManager>>,
    pub admin_api_key: Option<String>,
}

// Request/response types

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub entity_id: String,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct ReviewsDueResponse {
    pub total: usize,
    pub entity_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub base_credit_limit: f64,
    pub base_investment_limit: f64,
    pub base_transaction_limit: f64,
    pub review_period_days: u32,
    pub min_investment_maturity: u32,
}

impl PolicyResponse {
    fn from_policy(policy: &ScoringPolicy) -> Self {
        Self {
            base_credit_limit: policy.base_credit_limit,
            base_investment_limit: policy.base_investment_limit,
            base_transaction_limit: policy.base_transaction_limit,
            review_period_days: policy.review_period_days,
            min_investment_maturity: policy.min_investment_maturity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePolicyRequest {
    pub base_credit_limit: Option<f64>,
    pub base_investment_limit: Option<f64>,
    pub base_transaction_limit: Option<f64>,
    pub review_period_days: Option<u32>,
    pub min_investment_maturity: Option<u32>,
    pub admin_api_key: String,
}

// Endpoints

/// POST /trust/score - Recompute an entity's score from a fresh snapshot
pub async fn submit_score(
    State(state): State<TrustApiState>,
    Json(activity): Json<EntityActivity>,
) -> Result<Json<ReputationScore>, (StatusCode, String)> {
    if activity.entity_id.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "entity_id is required".to_string()));
    }

    let manager = state.manager.read().await;
    let score = manager.evaluate(&activity).await;
    Ok(Json(score))
}

/// GET /trust/score/:entity_id - Latest cached score
pub async fn get_score(
    State(state): State<TrustApiState>,
    Path(entity_id): Path<String>,
) -> Result<Json<ReputationScore>, (StatusCode, String)> {
    let manager = state.manager.read().await;

    match manager.get_score(&entity_id).await {
        Some(score) => Ok(Json(score)),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("No reputation score on record for entity {}", entity_id),
        )),
    }
}

/// POST /trust/check/transaction - Gate a proposed transaction
pub async fn check_transaction(
    State(state): State<TrustApiState>,
    Json(payload): Json<CheckRequest>,
) -> Json<EligibilityDecision> {
    let manager = state.manager.read().await;
    let decision = manager
        .check_transaction(&payload.entity_id, payload.amount)
        .await;
    Json(decision)
}

/// POST /trust/check/investment - Gate a proposed investment
pub async fn check_investment(
    State(state): State<TrustApiState>,
    Json(payload): Json<CheckRequest>,
) -> Json<EligibilityDecision> {
    let manager = state.manager.read().await;
    let decision = manager
        .check_investment(&payload.entity_id, payload.amount)
        .await;
    Json(decision)
}

/// GET /trust/reviews/due - Entities past their scheduled review date
pub async fn get_reviews_due(State(state): State<TrustApiState>) -> Json<ReviewsDueResponse> {
    let manager = state.manager.read().await;
    let entity_ids = manager.due_for_review(chrono::Utc::now()).await;

    Json(ReviewsDueResponse {
        total: entity_ids.len(),
        entity_ids,
    })
}

/// GET /trust/policy - Current scoring policy
pub async fn get_policy(State(state): State<TrustApiState>) -> Json<PolicyResponse> {
    let manager = state.manager.read().await;
    Json(PolicyResponse::from_policy(manager.policy()))
}

/// PUT /trust/policy - Update scoring policy (governance only)
pub async fn update_policy(
    State(state): State<TrustApiState>,
    Json(payload): Json<UpdatePolicyRequest>,
) -> Result<Json<PolicyResponse>, (StatusCode, String)> {
    // Validate admin API key
    if let Some(ref admin_key) = state.admin_api_key {
        if &payload.admin_api_key != admin_key {
            return Err((StatusCode::FORBIDDEN, "Invalid admin API key".to_string()));
        }
    } else {
        return Err((
            StatusCode::FORBIDDEN,
            "Admin API key not configured".to_string(),
        ));
    }

    let mut manager = state.manager.write().await;
    let current = manager.policy();

    let new_policy = ScoringPolicy {
        base_credit_limit: payload
            .base_credit_limit
            .unwrap_or(current.base_credit_limit),
        base_investment_limit: payload
            .base_investment_limit
            .unwrap_or(current.base_investment_limit),
        base_transaction_limit: payload
            .base_transaction_limit
            .unwrap_or(current.base_transaction_limit),
        review_period_days: payload
            .review_period_days
            .unwrap_or(current.review_period_days),
        min_investment_maturity: payload
            .min_investment_maturity
            .unwrap_or(current.min_investment_maturity),
    };

    if new_policy.base_credit_limit <= 0.0
        || new_policy.base_investment_limit <= 0.0
        || new_policy.base_transaction_limit <= 0.0
    {
        return Err((
            StatusCode::BAD_REQUEST,
            "Base limits must be positive".to_string(),
        ));
    }

    manager.update_policy(new_policy);

    Ok(Json(PolicyResponse::from_policy(manager.policy())))
}

/// Create the trust API router
pub fn create_trust_router(state: TrustApiState) -> Router {
    Router::new()
        .route("/score", post(submit_score))
        .route("/score/{entity_id}", get(get_score))
        .route("/check/transaction", post(check_transaction))
        .route("/check/investment", post(check_investment))
        .route("/reviews/due", get(get_reviews_due))
        .route("/policy", get(get_policy).put(update_policy))
        .with_state(state)
}
