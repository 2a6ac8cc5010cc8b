//! Weighted-tag rendering: `(prefix+name:weight)` joined by `,`.

use serde::Serialize;

use crate::weights::Weight;

/// One selected name with its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedItem {
    pub name: String,
    pub weight: Weight,
}

impl WeightedItem {
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Render as a single `(prefix+name:weight)` tag.
    pub fn tag(&self, prefix: &str) -> String {
        format!("({prefix}{}:{})", self.name, self.weight)
    }
}

/// Zip names with weights and render the prompt fragment.
///
/// Pairs beyond the shorter of the two slices are dropped. Empty input
/// renders as the empty string.
pub fn format_prompt<S: AsRef<str>>(names: &[S], weights: &[Weight], prefix: &str) -> String {
    names
        .iter()
        .zip(weights)
        .map(|(name, weight)| format!("({prefix}{}:{weight})", name.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render already-paired items.
pub fn format_items(items: &[WeightedItem], prefix: &str) -> String {
    items
        .iter()
        .map(|item| item.tag(prefix))
        .collect::<Vec<_>>()
        .join(",")
}
