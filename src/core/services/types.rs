use crate::error::{SqlError, ValidationError};

/// A queryable explore and, once fetched, its dimension names
#[derive(Debug, Clone, PartialEq)]
pub struct Explore {
    pub model: String,
    pub name: String,
    pub dimensions: Vec<String>,
}

impl Explore {
    pub fn new(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            name: name.into(),
            dimensions: Vec::new(),
        }
    }
}

/// What happened when an explore's query ran
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreOutcome {
    Passed,
    Failed(SqlError),
    /// No dimensions, so there was nothing to query
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExploreResult {
    pub explore: Explore,
    pub outcome: ExploreOutcome,
}

/// Result of validating every explore in a project
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub results: Vec<ExploreResult>,
}

impl ValidationReport {
    pub fn push(&mut self, explore: Explore, outcome: ExploreOutcome) {
        self.results.push(ExploreResult { explore, outcome });
    }

    pub fn has_errors(&self) -> bool {
        self.results
            .iter()
            .any(|r| matches!(r.outcome, ExploreOutcome::Failed(_)))
    }

    pub fn errors(&self) -> Vec<&SqlError> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                ExploreOutcome::Failed(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    pub fn passed_count(&self) -> usize {
        self.count(|o| matches!(o, ExploreOutcome::Passed))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, ExploreOutcome::Skipped))
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    fn count(&self, pred: impl Fn(&ExploreOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// `Err` when any explore failed
    pub fn ensure_passed(&self) -> Result<(), ValidationError> {
        let failed = self.errors().len();
        if failed == 0 {
            Ok(())
        } else {
            Err(ValidationError::ExploresFailed {
                failed,
                total: self.total(),
            })
        }
    }
}
