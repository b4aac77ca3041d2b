//! 30-day strategic report.

use super::{Shape, is_blank, null_as_default, string_list};
use serde::{Deserialize, Serialize};

/// Number of action items the planner asks for.
pub const ACTION_PLAN_LEN: usize = 3;

/// Performance analysis and action plan for the next 30 days.
///
/// The latest report is fed forward into content ideation so new topics lean
/// on the success pattern and steer clear of the weakness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategicReport {
    /// The element common only to the best performing videos.
    #[serde(deserialize_with = "null_as_default")]
    pub top_success_pattern: String,
    /// The failure point common only to the worst performing videos.
    #[serde(deserialize_with = "null_as_default")]
    pub core_weakness: String,
    /// Concrete instructions for the next 30 days. `null` items are dropped.
    #[serde(deserialize_with = "string_list")]
    pub action_plan: Vec<String>,
}

impl StrategicReport {
    /// Returns `true` if the plan has the requested number of items.
    #[must_use]
    pub fn has_full_action_plan(&self) -> bool {
        self.action_plan.len() == ACTION_PLAN_LEN
    }
}

impl Shape for StrategicReport {
    const NAME: &'static str = "strategic report";

    fn required_fields() -> &'static [&'static str] {
        &["topSuccessPattern", "coreWeakness", "actionPlan"]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.top_success_pattern) {
            missing.push("topSuccessPattern");
        }
        if is_blank(&self.core_weakness) {
            missing.push("coreWeakness");
        }
        if self.action_plan.is_empty() {
            missing.push("actionPlan");
        }
        missing
    }
}
