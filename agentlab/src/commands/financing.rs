//! Financing agent commands: cases, analyze, train, evaluate, export-training-data.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use agentlab_core::config::FinancingConfig;
use agentlab_financing::{
    AgentDecision, CaseCatalog, FinancingAgent, FinancingAgentConfig, FinancingCase,
};

const AGENT_NAME: &str = "Financing Advisor";

/// `--cases` wins over AGENTLAB_CASES_FILE; neither means the built-in cases.
fn load_catalog(cases: Option<&Path>) -> Result<CaseCatalog> {
    let cfg = FinancingConfig::from_env();
    let path = cases.or(cfg.cases_file.as_deref());
    CaseCatalog::load(path).context("Failed to load financing cases")
}

fn build_agent() -> FinancingAgent {
    let cfg = FinancingConfig::from_env();
    FinancingAgent::new(
        FinancingAgentConfig::new(AGENT_NAME).with_threshold(cfg.decision_threshold),
    )
}

#[derive(Debug, Serialize)]
struct CaseRow<'a> {
    id: u32,
    title: &'a str,
    device_type: &'a str,
    device: String,
    category: String,
    credit_score: u32,
    credit_range: String,
    options: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimal_choice: Option<&'a str>,
}

impl<'a> From<&'a FinancingCase> for CaseRow<'a> {
    fn from(c: &'a FinancingCase) -> Self {
        Self {
            id: c.id,
            title: &c.case_title,
            device_type: &c.device.device_type,
            device: format!("{} {}", c.device.brand, c.device.model),
            category: c.device.category().to_string(),
            credit_score: c.customer.credit_score,
            credit_range: c.customer.credit_range().to_string(),
            options: c.financing_options.len(),
            optimal_choice: c.optimal_choice.as_deref(),
        }
    }
}

/// Cases passing every given filter, in catalog order.
fn select_cases<'a>(
    catalog: &'a CaseCatalog,
    device_type: Option<&str>,
    score_range: Option<(u32, u32)>,
) -> Vec<&'a FinancingCase> {
    let mut selected: Vec<&FinancingCase> = match device_type {
        Some(t) => catalog.by_device_type(t),
        None => catalog.cases().iter().collect(),
    };
    if let Some((min, max)) = score_range {
        let in_range = catalog.by_credit_score(min, max);
        selected.retain(|c| in_range.iter().any(|r| std::ptr::eq(*r, *c)));
    }
    selected
}

/// `agentlab cases`
pub fn cmd_cases(
    cases: Option<&Path>,
    device_type: Option<&str>,
    score_range: Option<(u32, u32)>,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(cases)?;
    let selected = select_cases(&catalog, device_type, score_range);

    let rows: Vec<CaseRow> = selected.into_iter().map(CaseRow::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        eprintln!("No cases match.");
        return Ok(());
    }
    for row in &rows {
        println!(
            "{:>3}  {:<11} {:<28} {:<10} credit {} ({})  {} options",
            row.id,
            row.device_type,
            row.device,
            row.category,
            row.credit_score,
            row.credit_range,
            row.options
        );
    }
    Ok(())
}

fn render_decision(case: &FinancingCase, decision: &AgentDecision, threshold: f64) -> String {
    let mut out = vec![
        format!("Case {}: {}", case.id, case.case_title),
        format!(
            "Recommendation: {} (confidence {:.1}%)",
            decision.recommended_option_id, decision.confidence
        ),
    ];
    if !decision.is_no_option() && !decision.meets_threshold(threshold) {
        out.push(format!(
            "Needs review: confidence below {:.0}% threshold",
            threshold * 100.0
        ));
    }
    out.push("Reasoning:".to_string());
    out.extend(decision.reasoning.iter().map(|r| format!("  - {}", r)));
    if !decision.risk_factors.is_empty() {
        out.push("Risk factors:".to_string());
        out.extend(decision.risk_factors.iter().map(|r| format!("  - {}", r)));
    }
    if !decision.alternatives.is_empty() {
        out.push(format!("Alternatives: {}", decision.alternatives.join(", ")));
    }
    if let Some(ref optimal) = case.optimal_choice {
        let verdict = if *optimal == decision.recommended_option_id {
            "match"
        } else {
            "differs"
        };
        out.push(format!("Known optimum: {} ({})", optimal, verdict));
    }
    out.join("\n")
}

/// `agentlab analyze <ID>`
pub fn cmd_analyze(id: u32, cases: Option<&Path>, json: bool) -> Result<()> {
    let catalog = load_catalog(cases)?;
    let case = catalog
        .get(id)
        .with_context(|| format!("No financing case with id {}", id))?;
    let mut agent = build_agent();
    let decision = agent.analyze_case(case);

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        println!("{}", render_decision(case, &decision, agent.config().decision_threshold));
    }
    Ok(())
}

/// `agentlab train`
pub fn cmd_train(cases: Option<&Path>, limit: Option<usize>) -> Result<()> {
    let catalog = load_catalog(cases)?;
    let take = limit.unwrap_or(catalog.len()).min(catalog.len());
    let mut agent = build_agent();

    eprintln!("🎓 Training {} on {} cases...", agent.config().name, take);
    let record = agent.train(&catalog.cases()[..take])?;
    let metrics = agent.metrics();
    println!("Accuracy: {:.2}%", record.accuracy);
    println!(
        "Correct: {}/{}",
        metrics.correct_decisions, metrics.total_decisions
    );
    println!("Training time: {}ms", record.training_time_ms);
    Ok(())
}

/// `agentlab evaluate`
pub fn cmd_evaluate(cases: Option<&Path>, json: bool) -> Result<()> {
    let catalog = load_catalog(cases)?;
    let mut agent = build_agent();
    let metrics = agent.evaluate(catalog.cases())?;

    if json {
        println!("{}", serde_json::to_string_pretty(metrics)?);
        return Ok(());
    }
    for log in &metrics.decisions_log {
        let mark = if log.was_correct == Some(true) { "✅" } else { "❌" };
        println!(
            "{} case {:>2}: chose {:<7} optimum {:<7} confidence {:.1}%",
            mark,
            log.case_id,
            log.decision.recommended_option_id,
            log.actual_optimal.as_deref().unwrap_or("-"),
            log.decision.confidence
        );
    }
    println!();
    println!("Accuracy: {:.2}%", metrics.accuracy);
    println!(
        "Correct: {}/{}",
        metrics.correct_decisions, metrics.total_decisions
    );
    println!("Avg confidence: {:.2}%", metrics.average_confidence);
    Ok(())
}

/// `agentlab export-training-data`
pub fn cmd_export_training_data(cases: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(cases)?;
    println!("{}", serde_json::to_string_pretty(&catalog.training_data())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CaseCatalog {
        CaseCatalog::builtin().unwrap()
    }

    #[test]
    fn test_render_decision_marks_mismatch() {
        let catalog = catalog();
        let case = catalog.get(4).unwrap();
        let decision = build_agent().analyze_case(case);
        let text = render_decision(case, &decision, 0.7);
        assert!(text.starts_with("Case 4: "));
        assert!(text.contains("Recommendation: OPT-4A"));
        assert!(text.contains("Risk factors:"));
        assert!(text.contains("Known optimum: OPT-4C (differs)"));
    }

    #[test]
    fn test_render_decision_flags_low_confidence() {
        let catalog = catalog();
        let case = catalog.get(3).unwrap();
        let decision = build_agent().analyze_case(case);
        let text = render_decision(case, &decision, 0.7);
        assert!(text.contains("Needs review"));
        assert!(text.contains("(match)"));
    }

    #[test]
    fn test_case_row_summary() {
        let catalog = catalog();
        let row = CaseRow::from(catalog.get(1).unwrap());
        assert_eq!(row.device, "Apple iPhone 15 Pro Max");
        assert_eq!(row.category, "premium");
        assert_eq!(row.credit_range, "very-good");
        assert_eq!(row.options, 3);
    }

    #[test]
    fn test_select_cases_combines_filters() {
        let catalog = catalog();
        let ids = |cases: Vec<&FinancingCase>| cases.iter().map(|c| c.id).collect::<Vec<_>>();

        assert_eq!(select_cases(&catalog, None, None).len(), 8);
        assert_eq!(ids(select_cases(&catalog, Some("smartphone"), Some((600, 700)))), vec![2]);
        assert_eq!(ids(select_cases(&catalog, None, Some((600, 700)))), vec![2, 5, 8]);
        assert_eq!(ids(select_cases(&catalog, Some("Laptop"), None)), vec![5, 8]);
        assert!(select_cases(&catalog, Some("Tablet"), Some((300, 500))).is_empty());
    }

    #[test]
    fn test_load_catalog_from_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.json");
        let one = vec![catalog().cases()[0].clone()];
        std::fs::write(&path, serde_json::to_string(&one).unwrap()).unwrap();
        assert_eq!(load_catalog(Some(&path)).unwrap().len(), 1);
        assert!(load_catalog(Some(&dir.path().join("missing.json"))).is_err());
    }
}
