//! Trust Manager - Scoring Orchestrator
//!
//! Wraps the pure scoring engine with the concerns the surrounding
//! system needs: a cache of the latest snapshot per entity, eligibility
//! checks resolved against cached scores, and review scheduling.
//!
//! Callers are responsible for supplying a consistent snapshot of
//! metrics; the manager does not fetch or lock upstream data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::scoring::eligibility::{check_investment, check_transaction, EligibilityDecision};
use crate::scoring::engine::{ScoringPolicy, TrustEngine};
use crate::scoring::metrics::{ComplianceRecord, InvestmentMetrics, TransactionMetrics};
use crate::scoring::score::ReputationScore;

/// Consistent activity snapshot for one entity, as supplied by the
/// upstream aggregators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityActivity {
    pub entity_id: String,
    pub entity_name: String,
    pub transactions: TransactionMetrics,
    pub investments: InvestmentMetrics,
    pub compliance: Vec<ComplianceRecord>,
}

/// Main trust manager
pub struct TrustManager {
    engine: TrustEngine,

    /// Latest computed snapshot per entity
    scores: Arc<RwLock<HashMap<String, ReputationScore>>>,
}

impl TrustManager {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            engine: TrustEngine::new(policy),
            scores: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Recompute an entity's reputation from a fresh activity snapshot
    /// and cache the result.
    pub async fn evaluate(&self, activity: &EntityActivity) -> ReputationScore {
        self.evaluate_at(activity, Utc::now()).await
    }

    /// Recompute against an explicit clock instant (deterministic)
    pub async fn evaluate_at(
        &self,
        activity: &EntityActivity,
        now: DateTime<Utc>,
    ) -> ReputationScore {
        if !activity.transactions.is_well_formed() || !activity.investments.is_well_formed() {
            warn!(
                entity_id = %activity.entity_id,
                "Out-of-range metrics supplied; clamping at the scoring boundary"
            );
        }

        let score = self.engine.score_entity_at(
            &activity.entity_id,
            &activity.entity_name,
            &activity.transactions,
            &activity.investments,
            &activity.compliance,
            now,
        );

        {
            let mut cache = self.scores.write().await;
            cache.insert(activity.entity_id.clone(), score.clone());
        }

        info!(
            entity_id = %score.entity_id,
            overall_score = score.overall_score,
            risk_rating = %score.risk_rating,
            trust_level = ?score.trust_level,
            "Computed reputation score"
        );

        score
    }

    /// Latest cached snapshot for an entity, if one has been computed
    pub async fn get_score(&self, entity_id: &str) -> Option<ReputationScore> {
        let cache = self.scores.read().await;
        cache.get(entity_id).cloned()
    }

    /// Gate a proposed transaction against the entity's cached score
    pub async fn check_transaction(&self, entity_id: &str, amount: f64) -> EligibilityDecision {
        let decision = match self.get_score(entity_id).await {
            Some(score) => check_transaction(&score, amount),
            None => EligibilityDecision::deny(format!(
                "No reputation score on record for entity {}",
                entity_id
            )),
        };

        if decision.allowed {
            debug!(entity_id = %entity_id, amount = amount, "Transaction permitted");
        } else {
            warn!(
                entity_id = %entity_id,
                amount = amount,
                reason = decision.reason.as_deref().unwrap_or(""),
                "Transaction denied"
            );
        }

        decision
    }

    /// Gate a proposed investment against the entity's cached score
    pub async fn check_investment(&self, entity_id: &str, amount: f64) -> EligibilityDecision {
        let decision = match self.get_score(entity_id).await {
            Some(score) => {
                check_investment(&score, amount, self.engine.policy().min_investment_maturity)
            }
            None => EligibilityDecision::deny(format!(
                "No reputation score on record for entity {}",
                entity_id
            )),
        };

        if decision.allowed {
            debug!(entity_id = %entity_id, amount = amount, "Investment permitted");
        } else {
            warn!(
                entity_id = %entity_id,
                amount = amount,
                reason = decision.reason.as_deref().unwrap_or(""),
                "Investment denied"
            );
        }

        decision
    }

    /// Entities whose snapshot has passed its scheduled review date
    pub async fn due_for_review(&self, now: DateTime<Utc>) -> Vec<String> {
        let cache = self.scores.read().await;
        cache
            .values()
            .filter(|score| score.is_due_for_review(now))
            .map(|score| score.entity_id.clone())
            .collect()
    }

    /// Current scoring policy
    pub fn policy(&self) -> &ScoringPolicy {
        self.engine.policy()
    }

    /// Update the scoring policy (governance action).
    ///
    /// Cached snapshots keep the limits they were computed with until
    /// their next evaluation.
    pub fn update_policy(&mut self, policy: ScoringPolicy) {
        info!(
            base_credit_limit = policy.base_credit_limit,
            base_investment_limit = policy.base_investment_limit,
            base_transaction_limit = policy.base_transaction_limit,
            review_period_days = policy.review_period_days,
            "Scoring policy updated"
        );
        self.engine.set_policy(policy);
    }
}

impl Default for TrustManager {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}
