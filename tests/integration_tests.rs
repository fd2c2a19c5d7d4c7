//! Integration tests for the KIWZ Trust Engine
//!
//! These tests verify end-to-end scoring behavior: sub-score derivation,
//! the overall-score projection and rating ladder, dynamic limits,
//! eligibility gates, and the manager's cache/review flows.

use chrono::{Duration, Utc};
use kiwz_trust::{
    CheckStatus, CheckType, ComplianceRecord, EntityActivity, InvestmentMetrics, RiskRating,
    ScoringPolicy, TransactionMetrics, TrustEngine, TrustLevel, TrustManager,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Transaction history of a healthy, active entity
fn active_transactions() -> TransactionMetrics {
    TransactionMetrics {
        total_transactions: 100,
        successful_transactions: 98,
        failed_transactions: 2,
        total_volume: 50_000.0,
        average_transaction_size: 500.0,
        on_time_payment_rate: 0.97,
        late_payment_count: 3,
        default_count: 0,
    }
}

/// Investment history of a seasoned, diversified entity
fn seasoned_investments() -> InvestmentMetrics {
    InvestmentMetrics {
        total_investments: 20,
        total_invested_amount: 80_000.0,
        average_investment_size: 4_000.0,
        investment_diversification: 0.8,
        profitability_score: 0.5,
        ..Default::default()
    }
}

fn passed_checks(entity_id: &str, count: usize) -> Vec<ComplianceRecord> {
    (0..count)
        .map(|i| {
            ComplianceRecord::new(
                entity_id,
                CheckType::Kyc,
                CheckStatus::Passed,
                format!("periodic check {}", i + 1),
            )
        })
        .collect()
}

fn activity(entity_id: &str) -> EntityActivity {
    EntityActivity {
        entity_id: entity_id.to_string(),
        entity_name: "Integration Entity".to_string(),
        transactions: active_transactions(),
        investments: seasoned_investments(),
        compliance: passed_checks(entity_id, 3),
    }
}

fn zero_history_activity(entity_id: &str) -> EntityActivity {
    EntityActivity {
        entity_id: entity_id.to_string(),
        entity_name: "New Entity".to_string(),
        transactions: TransactionMetrics::default(),
        investments: InvestmentMetrics::default(),
        compliance: Vec::new(),
    }
}

// ============================================================================
// End-to-End Scoring Scenarios
// ============================================================================

mod scoring_scenarios {
    use super::*;

    #[test]
    fn test_healthy_entity_scores_verified() {
        let engine = TrustEngine::default();
        let score = engine.score_entity_at(
            "entity_good",
            "Good Entity",
            &active_transactions(),
            &seasoned_investments(),
            &passed_checks("entity_good", 3),
            Utc::now(),
        );

        assert_eq!(score.payment_reliability, 98);
        assert_eq!(score.investment_maturity, 84);
        assert_eq!(score.transaction_volume, 100);
        assert_eq!(score.compliance_score, 100);
        assert_eq!(score.overall_score, 954);
        assert_eq!(score.risk_rating, RiskRating::AAA);
        assert_eq!(score.trust_level, TrustLevel::Verified);

        // convex limit curves at these scores
        assert_eq!(score.credit_limit, 70_453.0);
        assert_eq!(score.investment_limit, 105_168.0);
        assert_eq!(score.transaction_limit, 34_104.0);
    }

    #[test]
    fn test_zero_history_entity_starts_suspended() {
        let engine = TrustEngine::default();
        let score = engine.score_entity_at(
            "entity_new",
            "New Entity",
            &TransactionMetrics::default(),
            &InvestmentMetrics::default(),
            &[],
            Utc::now(),
        );

        // neutral priors only
        assert_eq!(score.payment_reliability, 50);
        assert_eq!(score.investment_maturity, 30);
        assert_eq!(score.transaction_volume, 0);
        assert_eq!(score.compliance_score, 70);

        // 50*0.3 + 30*0.25 + 0 + 70*0.2 = 36.5, projected to 365
        assert_eq!(score.overall_score, 365);
        assert_eq!(score.risk_rating, RiskRating::D);

        // new entities start Suspended by policy consequence
        assert_eq!(score.trust_level, TrustLevel::Suspended);
    }

    #[test]
    fn test_flagged_compliance_drags_entity_down() {
        let engine = TrustEngine::default();
        let mut records = passed_checks("entity_flagged", 2);
        records.push(ComplianceRecord::new(
            "entity_flagged",
            CheckType::Sanctions,
            CheckStatus::Flagged,
            "name similarity on watchlist",
        ));
        records.push(ComplianceRecord::new(
            "entity_flagged",
            CheckType::Aml,
            CheckStatus::Failed,
            "unexplained inbound volume",
        ));

        let clean = engine.score_entity_at(
            "entity_clean",
            "Clean",
            &active_transactions(),
            &seasoned_investments(),
            &passed_checks("entity_clean", 4),
            Utc::now(),
        );
        let flagged = engine.score_entity_at(
            "entity_flagged",
            "Flagged",
            &active_transactions(),
            &seasoned_investments(),
            &records,
            Utc::now(),
        );

        // 2/4 passed = 50, minus 15 (failed) minus 10 (flagged)
        assert_eq!(flagged.compliance_score, 25);
        assert!(flagged.overall_score < clean.overall_score);
        assert!(flagged.credit_limit < clean.credit_limit);
    }

    #[test]
    fn test_idempotent_under_fixed_clock() {
        let engine = TrustEngine::default();
        let now = Utc::now();

        let first = engine.score_entity_at(
            "entity_1",
            "Entity One",
            &active_transactions(),
            &seasoned_investments(),
            &passed_checks("entity_1", 3),
            now,
        );
        let second = engine.score_entity_at(
            "entity_1",
            "Entity One",
            &active_transactions(),
            &seasoned_investments(),
            &passed_checks("entity_1", 3),
            now,
        );

        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first.risk_rating, second.risk_rating);
        assert_eq!(first.trust_level, second.trust_level);
        assert_eq!(first.credit_limit, second.credit_limit);
        assert_eq!(first.investment_limit, second.investment_limit);
        assert_eq!(first.transaction_limit, second.transaction_limit);
        assert_eq!(first.next_review_date, second.next_review_date);
    }

    #[test]
    fn test_malformed_upstream_data_stays_in_band() {
        let engine = TrustEngine::default();
        let hostile = TransactionMetrics {
            total_transactions: 10,
            successful_transactions: 90, // over-reported
            failed_transactions: 0,
            total_volume: -1_000.0,
            on_time_payment_rate: 4.2,
            ..Default::default()
        };
        let nan_investments = InvestmentMetrics {
            total_investments: 3,
            investment_diversification: f64::NAN,
            profitability_score: 9.0,
            ..Default::default()
        };

        let score = engine.score_entity_at(
            "entity_hostile",
            "Hostile Input",
            &hostile,
            &nan_investments,
            &[],
            Utc::now(),
        );

        assert!(score.payment_reliability <= 100);
        assert!(score.investment_maturity <= 100);
        assert!(score.transaction_volume <= 100);
        assert!(score.overall_score <= 1000);
    }
}

// ============================================================================
// Eligibility Gate Flows
// ============================================================================

mod eligibility_flows {
    use super::*;

    #[tokio::test]
    async fn test_suspended_entity_blocked_everywhere() {
        let manager = TrustManager::default();
        manager.evaluate(&zero_history_activity("entity_new")).await;

        let cached = manager.get_score("entity_new").await.unwrap();
        assert_eq!(cached.trust_level, TrustLevel::Suspended);

        // denied regardless of amount, including zero
        let zero = manager.check_transaction("entity_new", 0.0).await;
        assert!(!zero.allowed);
        assert_eq!(
            zero.reason.as_deref(),
            Some("Account suspended due to compliance issues")
        );

        assert!(!manager.check_transaction("entity_new", 10.0).await.allowed);
        assert!(!manager.check_investment("entity_new", 0.0).await.allowed);
    }

    #[tokio::test]
    async fn test_immature_investor_blocked_despite_good_standing() {
        // strong payments and compliance, but a single concentrated,
        // loss-making investment: maturity lands far below the gate
        let manager = TrustManager::default();
        let mut snapshot = activity("entity_saver");
        snapshot.investments = InvestmentMetrics {
            total_investments: 1,
            investment_diversification: 0.0,
            profitability_score: -1.0,
            ..Default::default()
        };
        manager.evaluate(&snapshot).await;

        let score = manager.get_score("entity_saver").await.unwrap();
        assert_eq!(score.investment_maturity, 3);
        assert_eq!(score.trust_level, TrustLevel::Trusted);

        let denied = manager.check_investment("entity_saver", 100.0).await;
        assert!(!denied.allowed);
        assert_eq!(
            denied.reason.as_deref(),
            Some("Insufficient investment history. Minimum maturity score: 30")
        );
    }

    #[tokio::test]
    async fn test_transaction_limits_enforced_through_manager() {
        let manager = TrustManager::default();
        manager.evaluate(&activity("entity_good")).await;
        let score = manager.get_score("entity_good").await.unwrap();

        let at_limit = manager
            .check_transaction("entity_good", score.transaction_limit)
            .await;
        assert!(at_limit.allowed);

        let over = manager
            .check_transaction("entity_good", score.transaction_limit + 0.01)
            .await;
        assert!(!over.allowed);
        assert!(over.reason.unwrap().contains("transaction limit"));
    }

    #[tokio::test]
    async fn test_investment_within_limit_and_maturity_allowed() {
        let manager = TrustManager::default();
        manager.evaluate(&activity("entity_good")).await;
        let score = manager.get_score("entity_good").await.unwrap();

        let decision = manager
            .check_investment("entity_good", score.investment_limit / 2.0)
            .await;
        assert!(decision.allowed);
        assert!(decision.reason.is_none());
    }
}

// ============================================================================
// Manager Cache & Review Flows
// ============================================================================

mod manager_flows {
    use super::*;

    #[tokio::test]
    async fn test_recomputation_replaces_cached_snapshot() {
        let manager = TrustManager::default();
        manager.evaluate(&activity("entity_1")).await;
        let before = manager.get_score("entity_1").await.unwrap();

        // entity defaults twice; reliability and limits must drop
        let mut degraded = activity("entity_1");
        degraded.transactions.default_count = 2;
        manager.evaluate(&degraded).await;
        let after = manager.get_score("entity_1").await.unwrap();

        assert!(after.payment_reliability < before.payment_reliability);
        assert!(after.transaction_limit < before.transaction_limit);
    }

    #[tokio::test]
    async fn test_review_schedule_follows_policy_period() {
        let manager = TrustManager::new(ScoringPolicy {
            review_period_days: 7,
            ..Default::default()
        });

        let computed_at = Utc::now() - Duration::days(8);
        manager
            .evaluate_at(&activity("entity_stale"), computed_at)
            .await;
        manager.evaluate(&activity("entity_fresh")).await;

        let due = manager.due_for_review(Utc::now()).await;
        assert_eq!(due, vec!["entity_stale".to_string()]);
    }

    #[tokio::test]
    async fn test_scores_are_per_entity() {
        let manager = TrustManager::default();
        manager.evaluate(&activity("entity_a")).await;
        manager.evaluate(&zero_history_activity("entity_b")).await;

        let a = manager.get_score("entity_a").await.unwrap();
        let b = manager.get_score("entity_b").await.unwrap();

        assert_eq!(a.trust_level, TrustLevel::Verified);
        assert_eq!(b.trust_level, TrustLevel::Suspended);
    }
}
