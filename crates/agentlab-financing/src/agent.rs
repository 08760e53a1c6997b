//! Rule-based financing agent.
//!
//! For each case the agent drops the options the customer's credit score does
//! not qualify for, scores the rest on cost, affordability, term fit, interest
//! and early-payoff flexibility, and recommends the best one with reasoning,
//! risk factors and up to two alternatives.

use std::cmp::Ordering;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{FinancingError, Result};
use crate::types::{
    AgentDecision, AgentState, DecisionLog, DecisionWeights, FinancingAgentConfig, FinancingCase,
    FinancingOption, ModelType, PerformanceMetrics, TrainingRecord, NO_OPTION,
};

/// Fixed weight of the interest-rate factor.
const INTEREST_WEIGHT: f64 = 0.15;
const NO_PENALTY_BONUS: f64 = 20.0;
/// Term score when the customer states no preferred period.
const NEUTRAL_TERM_SCORE: f64 = 70.0;
const MIN_CONFIDENCE: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 95.0;
/// Payment-to-income ratio above which a payment is flagged.
const PAYMENT_RISK_RATIO: f64 = 0.15;
const LOW_CREDIT_SCORE: u32 = 650;
const PROGRESS_EVERY: usize = 5;

/// Partial configuration change; `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub name: Option<String>,
    pub model_type: Option<ModelType>,
    pub decision_threshold: Option<f64>,
    pub learning_rate: Option<f64>,
    pub weights: Option<DecisionWeights>,
}

#[derive(Debug, Clone)]
pub struct FinancingAgent {
    config: FinancingAgentConfig,
    metrics: PerformanceMetrics,
    training_history: Vec<TrainingRecord>,
}

impl FinancingAgent {
    pub fn new(config: FinancingAgentConfig) -> Self {
        Self {
            config,
            metrics: PerformanceMetrics::default(),
            training_history: Vec::new(),
        }
    }

    pub fn config(&self) -> &FinancingAgentConfig {
        &self.config
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn training_history(&self) -> &[TrainingRecord] {
        &self.training_history
    }

    /// Recommend a financing option for `case`.
    ///
    /// When no option qualifies the result is the `NONE` decision, which is
    /// not counted in the metrics.
    pub fn analyze_case(&mut self, case: &FinancingCase) -> AgentDecision {
        tracing::info!(
            agent = %self.config.name,
            case_id = case.id,
            title = %case.case_title,
            "Analyzing financing case"
        );

        let credit = case.customer.credit_score;
        let mut scored: Vec<(&FinancingOption, f64)> = case
            .financing_options
            .iter()
            .filter(|o| credit >= o.credit_score_required)
            .map(|o| (o, self.score_option(o, case)))
            .collect();

        if scored.is_empty() {
            tracing::warn!(
                case_id = case.id,
                credit_score = credit,
                "Customer qualifies for no option"
            );
            return no_qualification_decision(case);
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let decision = build_decision(&scored, case);
        self.log_decision(case, &decision);
        decision
    }

    fn score_option(&self, option: &FinancingOption, case: &FinancingCase) -> f64 {
        let w = &self.config.weights;
        let base = case.device.base_price;
        let cost = (1.0 - (option.total_cost - base) / base) * 100.0;

        let ratio = option.monthly_payment / case.customer.monthly_income;
        let affordability = if ratio < 0.10 {
            100.0
        } else if ratio < 0.15 {
            80.0
        } else if ratio < 0.20 {
            60.0
        } else {
            40.0
        };

        let term = match case.customer.preferred_payment_period {
            Some(preferred) => 100.0 - f64::from(option.months.abs_diff(preferred)) * 5.0,
            None => NEUTRAL_TERM_SCORE,
        };

        let interest = (1.0 - option.interest_rate) * 100.0;
        let bonus = if option.early_payoff_penalty {
            0.0
        } else {
            NO_PENALTY_BONUS
        };

        cost * w.total_cost
            + affordability * w.monthly_payment
            + term * w.customer_preference
            + interest * INTEREST_WEIGHT
            + bonus
    }

    fn log_decision(&mut self, case: &FinancingCase, decision: &AgentDecision) {
        self.metrics.total_decisions += 1;
        if is_correct(case, decision) {
            self.metrics.correct_decisions += 1;
        }
        self.metrics.accuracy = f64::from(self.metrics.correct_decisions)
            / f64::from(self.metrics.total_decisions)
            * 100.0;

        if !decision.meets_threshold(self.config.decision_threshold) {
            tracing::warn!(
                case_id = case.id,
                confidence = decision.confidence,
                threshold = self.config.decision_threshold,
                "Decision confidence below threshold"
            );
        }
        agentlab_core::observability::audit_decision_made(
            &self.config.agent_id,
            case.id,
            &decision.recommended_option_id,
            decision.confidence,
        );
    }

    /// Run every case and record how often the agent picked the known optimum.
    pub fn train(&mut self, cases: &[FinancingCase]) -> Result<TrainingRecord> {
        if cases.is_empty() {
            return Err(FinancingError::EmptyCaseSet("train"));
        }
        tracing::info!(agent = %self.config.name, cases = cases.len(), "Training started");

        let started = Instant::now();
        let mut correct = 0usize;
        for (i, case) in cases.iter().enumerate() {
            let decision = self.analyze_case(case);
            if is_correct(case, &decision) {
                correct += 1;
            }
            let seen = i + 1;
            if seen % PROGRESS_EVERY == 0 || seen == cases.len() {
                tracing::info!(
                    progress = %format!("{}/{}", seen, cases.len()),
                    accuracy = correct as f64 / seen as f64 * 100.0,
                    "Training progress"
                );
            }
        }

        let record = TrainingRecord {
            timestamp: Utc::now(),
            cases_count: cases.len(),
            accuracy: correct as f64 / cases.len() as f64 * 100.0,
            training_time_ms: started.elapsed().as_millis() as u64,
        };
        tracing::info!(
            accuracy = record.accuracy,
            correct,
            total = cases.len(),
            elapsed_ms = record.training_time_ms,
            "Training complete"
        );
        self.training_history.push(record.clone());
        Ok(record)
    }

    /// Analyze every case, log each decision and replace the headline metrics
    /// with this batch's results.
    pub fn evaluate(&mut self, cases: &[FinancingCase]) -> Result<&PerformanceMetrics> {
        if cases.is_empty() {
            return Err(FinancingError::EmptyCaseSet("evaluate"));
        }
        tracing::info!(agent = %self.config.name, cases = cases.len(), "Evaluation started");

        let mut correct = 0u32;
        let mut total_confidence = 0.0;
        for case in cases {
            let decision = self.analyze_case(case);
            let was_correct = is_correct(case, &decision);
            if was_correct {
                correct += 1;
            }
            total_confidence += decision.confidence;
            self.metrics.decisions_log.push(DecisionLog {
                case_id: case.id,
                timestamp: Utc::now(),
                decision,
                actual_optimal: case.optimal_choice.clone(),
                was_correct: Some(was_correct),
            });
        }

        let total = cases.len() as u32;
        self.metrics.total_decisions = total;
        self.metrics.correct_decisions = correct;
        self.metrics.accuracy = f64::from(correct) / f64::from(total) * 100.0;
        self.metrics.average_confidence = total_confidence / f64::from(total);
        tracing::info!(
            accuracy = self.metrics.accuracy,
            correct,
            total,
            average_confidence = self.metrics.average_confidence,
            "Evaluation complete"
        );
        Ok(&self.metrics)
    }

    pub fn update_config(&mut self, update: ConfigUpdate) {
        if let Some(name) = update.name {
            self.config.name = name;
        }
        if let Some(model_type) = update.model_type {
            self.config.model_type = model_type;
        }
        if let Some(threshold) = update.decision_threshold {
            self.config.decision_threshold = threshold;
        }
        if let Some(rate) = update.learning_rate {
            self.config.learning_rate = Some(rate);
        }
        if let Some(weights) = update.weights {
            self.config.weights = weights;
        }
        tracing::info!(config = ?self.config, "Agent configuration updated");
    }

    pub fn export_state(&self) -> AgentState {
        AgentState {
            config: self.config.clone(),
            performance_metrics: self.metrics.clone(),
            training_history: self.training_history.clone(),
        }
    }
}

fn is_correct(case: &FinancingCase, decision: &AgentDecision) -> bool {
    case.optimal_choice.as_deref() == Some(decision.recommended_option_id.as_str())
}

/// `scored` is non-empty and sorted best first.
fn build_decision(scored: &[(&FinancingOption, f64)], case: &FinancingCase) -> AgentDecision {
    let (top, score) = scored[0];
    let customer = &case.customer;
    let ratio = top.monthly_payment / customer.monthly_income;

    let mut reasoning = vec![
        format!("Selected {} ({})", top.option, top.option_id),
        format!("Total cost: ${:.2}", top.total_cost),
        format!(
            "Monthly payment: ${:.2} ({:.1}% of monthly income)",
            top.monthly_payment,
            ratio * 100.0
        ),
    ];
    if top.interest_rate == 0.0 {
        reasoning.push("0% APR - No interest charges".to_string());
    } else {
        reasoning.push(format!("Interest rate: {:.1}% APR", top.interest_rate * 100.0));
    }
    if !top.early_payoff_penalty {
        reasoning.push("No early payoff penalty - Flexible repayment".to_string());
    }
    if customer.preferred_payment_period == Some(top.months) {
        reasoning.push(format!("Matches customer's preferred {}-month term", top.months));
    }

    let mut risk_factors = Vec::new();
    if ratio > PAYMENT_RISK_RATIO {
        risk_factors.push(format!(
            "Monthly payment is {:.1}% of income (>15% threshold)",
            ratio * 100.0
        ));
    }
    if customer.existing_device_loans > 0 {
        risk_factors.push(format!(
            "Customer has {} existing device loan(s)",
            customer.existing_device_loans
        ));
    }
    if customer.credit_score < LOW_CREDIT_SCORE {
        risk_factors
            .push("Below-average credit score may limit future financing options".to_string());
    }

    AgentDecision {
        recommended_option_id: top.option_id.clone(),
        confidence: score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
        reasoning,
        alternatives: scored
            .iter()
            .skip(1)
            .take(2)
            .map(|(o, _)| o.option_id.clone())
            .collect(),
        risk_factors,
        customer_fit_score: score,
    }
}

fn no_qualification_decision(case: &FinancingCase) -> AgentDecision {
    let minimum = case
        .financing_options
        .iter()
        .map(|o| o.credit_score_required)
        .min()
        .map_or_else(|| "n/a".to_string(), |m| m.to_string());

    AgentDecision {
        recommended_option_id: NO_OPTION.to_string(),
        confidence: 0.0,
        reasoning: vec![
            format!(
                "Customer credit score ({}) does not qualify for any available options",
                case.customer.credit_score
            ),
            format!("Minimum required: {}", minimum),
            "Recommendation: Consider secured financing or co-signer options".to_string(),
        ],
        alternatives: Vec::new(),
        risk_factors: vec!["Credit score below all option thresholds".to_string()],
        customer_fit_score: 0.0,
    }
}
