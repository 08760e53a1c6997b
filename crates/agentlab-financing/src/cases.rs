//! Financing case catalog: the built-in seed cases, or cases loaded from a
//! JSON file with the same shape.

use std::path::Path;

use crate::error::{FinancingError, Result};
use crate::types::{FinancingCase, TrainingData, TrainingExample};

const SEED_CASES: &str = include_str!("seed/cases.seed.json");

#[derive(Debug, Clone, Default)]
pub struct CaseCatalog {
    cases: Vec<FinancingCase>,
}

impl CaseCatalog {
    /// The eight built-in cases.
    pub fn builtin() -> Result<Self> {
        Self::from_json(SEED_CASES)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cases: Vec<FinancingCase> = serde_json::from_str(json)?;
        Ok(Self { cases })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FinancingError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), cases = catalog.len(), "Loaded case catalog");
        Ok(catalog)
    }

    /// `path` when given, otherwise the built-in cases.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::builtin(),
        }
    }

    pub fn from_cases(cases: Vec<FinancingCase>) -> Self {
        Self { cases }
    }

    pub fn cases(&self) -> &[FinancingCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&FinancingCase> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Case-insensitive match on the device type.
    pub fn by_device_type(&self, device_type: &str) -> Vec<&FinancingCase> {
        self.cases
            .iter()
            .filter(|c| c.device.device_type.eq_ignore_ascii_case(device_type))
            .collect()
    }

    /// Customers with `min <= credit_score <= max`.
    pub fn by_credit_score(&self, min: u32, max: u32) -> Vec<&FinancingCase> {
        self.cases
            .iter()
            .filter(|c| (min..=max).contains(&c.customer.credit_score))
            .collect()
    }

    pub fn training_data(&self) -> TrainingData {
        TrainingData {
            total_cases: self.cases.len(),
            cases: self.cases.iter().map(TrainingExample::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = CaseCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 8);
        let first = catalog.get(1).unwrap();
        assert_eq!(first.device.model, "iPhone 15 Pro Max");
        assert_eq!(first.optimal_choice.as_deref(), Some("OPT-1B"));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_by_device_type_ignores_case() {
        let catalog = CaseCatalog::builtin().unwrap();
        let ids: Vec<u32> = catalog.by_device_type("smartphone").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(catalog.by_device_type("TABLET").len(), 2);
        assert!(catalog.by_device_type("toaster").is_empty());
    }

    #[test]
    fn test_by_credit_score_is_inclusive() {
        let catalog = CaseCatalog::builtin().unwrap();
        let ids: Vec<u32> = catalog.by_credit_score(650, 720).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 6, 8]);
        assert!(catalog.by_credit_score(900, 950).is_empty());
    }

    #[test]
    fn test_training_data_export() {
        let catalog = CaseCatalog::builtin().unwrap();
        let data = catalog.training_data();
        assert_eq!(data.total_cases, 8);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["cases"][0]["expected_output"]["recommendation"], "OPT-1B");
        assert_eq!(json["cases"][0]["input"]["customer"]["credit_score"], 780);
    }

    #[test]
    fn test_from_path_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.json");
        let case = CaseCatalog::builtin().unwrap().cases()[2].clone();
        let one = serde_json::to_string(&vec![case]).unwrap();
        std::fs::write(&path, one).unwrap();

        let catalog = CaseCatalog::load(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.cases()[0].id, 3);

        let missing = CaseCatalog::from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, FinancingError::CatalogIo { .. }));

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            CaseCatalog::from_path(&path),
            Err(FinancingError::CatalogParse(_))
        ));
    }
}
