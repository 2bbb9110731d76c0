//! Per-rule outcomes of a normalization run.

use serde::{Deserialize, Serialize};

use crate::rules::Rule;

/// What a single rule did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// A column the rule depends on is absent.
    Skipped,
    /// The rule ran; `changed` counts rewritten cells or renamed headers.
    Applied { changed: usize },
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn changed(&self) -> usize {
        match self {
            Self::Skipped => 0,
            Self::Applied { changed } => *changed,
        }
    }

    /// Combine outcomes of sub-steps: applied if any sub-step applied.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Skipped, Self::Skipped) => Self::Skipped,
            (left, right) => Self::Applied {
                changed: left.changed() + right.changed(),
            },
        }
    }
}

impl From<Option<usize>> for StepOutcome {
    fn from(changed: Option<usize>) -> Self {
        changed.map_or(Self::Skipped, |changed| Self::Applied { changed })
    }
}

/// Outcome of one rule within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub rule: Rule,
    pub outcome: StepOutcome,
}

/// Summary of a normalization run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Rows in the table (unchanged by normalization).
    pub rows: usize,
    pub columns_in: usize,
    pub columns_out: usize,
    /// One entry per rule, in execution order.
    pub steps: Vec<StepReport>,
}

impl NormalizeReport {
    /// Total cells and headers rewritten across all rules.
    pub fn total_changed(&self) -> usize {
        self.steps.iter().map(|step| step.outcome.changed()).sum()
    }

    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|step| step.outcome.is_applied()).count()
    }

    /// Rules skipped because their columns were missing.
    pub fn skipped_rules(&self) -> Vec<Rule> {
        self.steps
            .iter()
            .filter(|step| !step.outcome.is_applied())
            .map(|step| step.rule)
            .collect()
    }

    pub fn outcome(&self, rule: Rule) -> Option<StepOutcome> {
        self.steps
            .iter()
            .find(|step| step.rule == rule)
            .map(|step| step.outcome)
    }
}
