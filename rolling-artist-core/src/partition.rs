//! Top / non-top split of the reference list.
//!
//! The reference list is ordered by popularity, so the "top" side is simply
//! a prefix whose length is derived from a ratio. The split is a plain value:
//! building one never touches a previously built partition.

use std::collections::HashSet;

/// Two disjoint sides of the reference list.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    ratio: f64,
    top: Vec<String>,
    non_top: Vec<String>,
}

impl Partition {
    /// Split `names` at `max(1, floor(len * ratio))`, capped at `len`.
    ///
    /// `non_top` is everything not equal to a top entry. If the list holds a
    /// duplicated value and one copy lands in the prefix, every copy is
    /// excluded from `non_top`.
    ///
    /// The ratio is expected to lie in `(0, 1]`; see
    /// [`RollRequest::validate`](crate::request::RollRequest::validate).
    pub fn new(names: &[String], ratio: f64) -> Self {
        if names.is_empty() {
            return Self {
                ratio,
                top: Vec::new(),
                non_top: Vec::new(),
            };
        }

        let top_len = top_len(names.len(), ratio);
        let top = names[..top_len].to_vec();
        let top_set: HashSet<&str> = top.iter().map(String::as_str).collect();
        let non_top = names
            .iter()
            .filter(|name| !top_set.contains(name.as_str()))
            .cloned()
            .collect();

        Self {
            ratio,
            top,
            non_top,
        }
    }

    /// Ratio this partition was built for.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn top(&self) -> &[String] {
        &self.top
    }

    pub fn non_top(&self) -> &[String] {
        &self.non_top
    }

    /// Total number of entries across both sides.
    pub fn len(&self) -> usize {
        self.top.len() + self.non_top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.non_top.is_empty()
    }

    /// Whether `name` belongs to the top side.
    pub fn is_top(&self, name: &str) -> bool {
        self.top.iter().any(|t| t == name)
    }
}

fn top_len(len: usize, ratio: f64) -> usize {
    let raw = (len as f64 * ratio).floor();
    let raw = if raw.is_finite() && raw > 0.0 {
        raw as usize
    } else {
        0
    };
    raw.clamp(1, len)
}
