//! Side-by-side comparison of 2–3 named colleges over chosen metrics.
//!
//! The comparison itself is the LLM's job; this module only validates the
//! request and resolves metric ids to the names that go into the prompt.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MIN_COLLEGES: usize = 2;
pub const MAX_COLLEGES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetric {
    pub id: String,
    pub name: String,
    /// Whether the metric is used when the request names none.
    pub selected: bool,
}

const DEFAULT_METRICS: &[(&str, &str, bool)] = &[
    ("fees", "Tuition Fees", true),
    ("campus", "Campus Facilities", true),
    ("placements", "Placements & Packages", true),
    ("faculty", "Student-Faculty Ratio", false),
    ("research", "Research Opportunities", false),
    ("exchange", "International Exchange Programs", false),
    ("ranking", "University Rankings", false),
    ("alumni", "Alumni Network", false),
    ("location", "Location & Accessibility", false),
    ("diversity", "Campus Diversity", false),
];

pub fn default_metrics() -> Vec<ComparisonMetric> {
    DEFAULT_METRICS
        .iter()
        .map(|(id, name, selected)| ComparisonMetric {
            id: id.to_string(),
            name: name.to_string(),
            selected: *selected,
        })
        .collect()
}

/// Id for a custom metric: lowercased, whitespace runs collapsed to `_`.
pub fn metric_id(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonRequest {
    pub colleges: Vec<String>,
    /// Metric ids or custom metric names. `None` means the default selection.
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
}

/// A validated request, ready to be turned into a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPlan {
    pub colleges: Vec<String>,
    pub metrics: Vec<ComparisonMetric>,
}

impl ComparisonRequest {
    pub fn plan(&self) -> Result<ComparisonPlan, AppError> {
        let colleges: Vec<String> = self
            .colleges
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if colleges.len() < MIN_COLLEGES {
            return Err(AppError::Validation(format!(
                "Please add at least {MIN_COLLEGES} colleges to compare"
            )));
        }
        if colleges.len() > MAX_COLLEGES {
            return Err(AppError::Validation(format!(
                "At most {MAX_COLLEGES} colleges can be compared at once"
            )));
        }

        let metrics = match &self.metrics {
            None => default_metrics().into_iter().filter(|m| m.selected).collect(),
            Some(requested) => resolve_metrics(requested),
        };

        if metrics.is_empty() {
            return Err(AppError::Validation(
                "Please select at least one comparison metric".to_string(),
            ));
        }

        Ok(ComparisonPlan { colleges, metrics })
    }
}

/// Known ids or names map to their default metric; anything else becomes a
/// custom metric. Blank and repeated entries are dropped.
fn resolve_metrics(requested: &[String]) -> Vec<ComparisonMetric> {
    let defaults = default_metrics();
    let mut resolved: Vec<ComparisonMetric> = Vec::new();

    for entry in requested.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
        let id = metric_id(entry);
        let metric = defaults
            .iter()
            .find(|m| m.id == id || m.name.eq_ignore_ascii_case(entry))
            .map(|m| ComparisonMetric {
                selected: true,
                ..m.clone()
            })
            .unwrap_or_else(|| ComparisonMetric {
                id,
                name: entry.to_string(),
                selected: true,
            });
        if !resolved.iter().any(|m| m.id == metric.id) {
            resolved.push(metric);
        }
    }
    resolved
}
