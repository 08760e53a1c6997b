//! Data types for financing cases, agent decisions and performance tracking.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recommendation id used when the customer qualifies for nothing.
pub const NO_OPTION: &str = "NONE";

// ─── Cases ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub base_price: f64,
    pub msrp: f64,
}

impl DeviceInfo {
    pub fn category(&self) -> DeviceCategory {
        categorize_device(self.base_price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: String,
    pub credit_score: u32,
    pub monthly_income: f64,
    pub existing_device_loans: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_payment_period: Option<u32>,
}

impl CustomerProfile {
    pub fn credit_range(&self) -> CreditScoreRange {
        categorize_credit_score(self.credit_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingOption {
    pub option_id: String,
    /// Human-readable description, e.g. "0% APR 24-month financing".
    pub option: String,
    pub months: u32,
    /// Annual rate as a fraction.
    pub interest_rate: f64,
    pub down_payment: f64,
    pub monthly_payment: f64,
    pub total_cost: f64,
    pub credit_score_required: u32,
    pub early_payoff_penalty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    #[serde(default)]
    pub competitor_offers: Vec<String>,
    pub seasonal_promotions: bool,
    pub inventory_level: InventoryLevel,
}

/// One purchase scenario with its candidate financing options and, for
/// training data, the known best option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingCase {
    pub id: u32,
    pub case_title: String,
    pub device: DeviceInfo,
    pub customer: CustomerProfile,
    pub user_scenario: String,
    pub financing_options: Vec<FinancingOption>,
    pub market_context: MarketContext,
    #[serde(default)]
    pub agent_decision_factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

// ─── Categories ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditScoreRange {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl fmt::Display for CreditScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CreditScoreRange::Poor => "poor",
            CreditScoreRange::Fair => "fair",
            CreditScoreRange::Good => "good",
            CreditScoreRange::VeryGood => "very-good",
            CreditScoreRange::Excellent => "excellent",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceCategory {
    Budget,
    MidRange,
    Premium,
    Flagship,
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceCategory::Budget => "budget",
            DeviceCategory::MidRange => "mid-range",
            DeviceCategory::Premium => "premium",
            DeviceCategory::Flagship => "flagship",
        };
        f.write_str(s)
    }
}

pub fn categorize_credit_score(score: u32) -> CreditScoreRange {
    match score {
        s if s < 580 => CreditScoreRange::Poor,
        s if s < 670 => CreditScoreRange::Fair,
        s if s < 740 => CreditScoreRange::Good,
        s if s < 800 => CreditScoreRange::VeryGood,
        _ => CreditScoreRange::Excellent,
    }
}

pub fn categorize_device(price: f64) -> DeviceCategory {
    if price < 300.0 {
        DeviceCategory::Budget
    } else if price < 800.0 {
        DeviceCategory::MidRange
    } else if price < 1500.0 {
        DeviceCategory::Premium
    } else {
        DeviceCategory::Flagship
    }
}

// ─── Agent configuration ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelType {
    RuleBased,
    MlBased,
    Hybrid,
}

/// Relative weight of each scoring factor.
///
/// `credit_score` and `term_length` are carried for configuration
/// compatibility; the rule-based scorer weighs interest rate at a fixed 0.15.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionWeights {
    pub total_cost: f64,
    pub monthly_payment: f64,
    pub customer_preference: f64,
    pub credit_score: f64,
    pub term_length: f64,
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self {
            total_cost: 0.25,
            monthly_payment: 0.30,
            customer_preference: 0.20,
            credit_score: 0.15,
            term_length: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingAgentConfig {
    pub agent_id: String,
    pub name: String,
    pub model_type: ModelType,
    /// Minimum confidence, as a fraction, for a decision to stand without review.
    pub decision_threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(default)]
    pub weights: DecisionWeights,
}

impl FinancingAgentConfig {
    /// Rule-based config with a fresh agent id and default weights.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            agent_id: format!("fin-{}", uuid::Uuid::new_v4()),
            name: name.into(),
            model_type: ModelType::RuleBased,
            decision_threshold: 0.7,
            learning_rate: None,
            weights: DecisionWeights::default(),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.decision_threshold = threshold;
        self
    }
}

// ─── Decisions and metrics ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDecision {
    pub recommended_option_id: String,
    /// 0..=100
    pub confidence: f64,
    pub reasoning: Vec<String>,
    pub alternatives: Vec<String>,
    pub risk_factors: Vec<String>,
    pub customer_fit_score: f64,
}

impl AgentDecision {
    pub fn is_no_option(&self) -> bool {
        self.recommended_option_id == NO_OPTION
    }

    /// `threshold` is a fraction; confidence is a percentage.
    pub fn meets_threshold(&self, threshold: f64) -> bool {
        self.confidence >= threshold * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionLog {
    pub case_id: u32,
    pub timestamp: DateTime<Utc>,
    pub decision: AgentDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_optimal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_correct: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_decisions: u32,
    pub correct_decisions: u32,
    /// Percentage.
    pub accuracy: f64,
    pub average_confidence: f64,
    #[serde(default)]
    pub decisions_log: Vec<DecisionLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub timestamp: DateTime<Utc>,
    pub cases_count: usize,
    pub accuracy: f64,
    pub training_time_ms: u64,
}

/// Serialisable snapshot of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub config: FinancingAgentConfig,
    pub performance_metrics: PerformanceMetrics,
    pub training_history: Vec<TrainingRecord>,
}

// ─── Training data export ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TrainingInput {
    pub device: DeviceInfo,
    pub customer: CustomerProfile,
    pub scenario: String,
    pub options: Vec<FinancingOption>,
    pub context: MarketContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpectedOutput {
    pub recommendation: Option<String>,
    pub reasoning: Option<String>,
    pub decision_factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingExample {
    pub input: TrainingInput,
    pub expected_output: ExpectedOutput,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingData {
    pub total_cases: usize,
    pub cases: Vec<TrainingExample>,
}

impl From<&FinancingCase> for TrainingExample {
    fn from(c: &FinancingCase) -> Self {
        Self {
            input: TrainingInput {
                device: c.device.clone(),
                customer: c.customer.clone(),
                scenario: c.user_scenario.clone(),
                options: c.financing_options.clone(),
                context: c.market_context.clone(),
            },
            expected_output: ExpectedOutput {
                recommendation: c.optimal_choice.clone(),
                reasoning: c.reasoning.clone(),
                decision_factors: c.agent_decision_factors.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_credit_score_bounds() {
        assert_eq!(categorize_credit_score(579), CreditScoreRange::Poor);
        assert_eq!(categorize_credit_score(580), CreditScoreRange::Fair);
        assert_eq!(categorize_credit_score(669), CreditScoreRange::Fair);
        assert_eq!(categorize_credit_score(670), CreditScoreRange::Good);
        assert_eq!(categorize_credit_score(740), CreditScoreRange::VeryGood);
        assert_eq!(categorize_credit_score(800), CreditScoreRange::Excellent);
        assert_eq!(CreditScoreRange::VeryGood.to_string(), "very-good");
    }

    #[test]
    fn test_categorize_device_bounds() {
        assert_eq!(categorize_device(299.99), DeviceCategory::Budget);
        assert_eq!(categorize_device(300.0), DeviceCategory::MidRange);
        assert_eq!(categorize_device(1199.0), DeviceCategory::Premium);
        assert_eq!(categorize_device(1500.0), DeviceCategory::Flagship);
    }

    #[test]
    fn test_config_defaults() {
        let cfg = FinancingAgentConfig::new("Advisor");
        assert!(cfg.agent_id.starts_with("fin-"));
        assert_eq!(cfg.model_type, ModelType::RuleBased);
        assert_eq!(cfg.weights, DecisionWeights::default());
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["model_type"], "rule-based");
        assert!(json.get("learning_rate").is_none());
    }

    #[test]
    fn test_decision_threshold_is_fractional() {
        let decision = AgentDecision {
            recommended_option_id: "OPT-1A".into(),
            confidence: 72.0,
            reasoning: vec![],
            alternatives: vec![],
            risk_factors: vec![],
            customer_fit_score: 72.0,
        };
        assert!(decision.meets_threshold(0.7));
        assert!(!decision.meets_threshold(0.8));
        assert!(!decision.is_no_option());
    }
}
