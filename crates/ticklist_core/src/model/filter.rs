//! Completion-state view filter.
//!
//! # Responsibility
//! - Narrow the displayed collection by completion state.
//! - Map to and from the external query-parameter representation.
//!
//! # Invariants
//! - The wire strings `all|active|completed` are stable; the persisted
//!   `todos:filter` record holds exactly one of them.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// View predicate narrowing displayed tasks by completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// No narrowing.
    #[default]
    All,
    /// Only tasks with `completed == false`.
    Active,
    /// Only tasks with `completed == true`.
    Completed,
}

impl Filter {
    /// Stable wire string for this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parses a wire/query string; unrecognized values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Query-parameter value for the view-state initializer.
    ///
    /// `All` is the default view and is omitted from the query string.
    pub fn query_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            other => Some(other.as_str()),
        }
    }

    /// Whether `task` passes this filter.
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Filter;

    #[test]
    fn parse_accepts_exact_wire_strings_only() {
        assert_eq!(Filter::parse("active"), Some(Filter::Active));
        assert_eq!(Filter::parse("completed"), Some(Filter::Completed));
        assert_eq!(Filter::parse("all"), Some(Filter::All));
        assert_eq!(Filter::parse("Active"), None);
        assert_eq!(Filter::parse(""), None);
    }

    #[test]
    fn query_param_omits_the_default_view() {
        assert_eq!(Filter::All.query_param(), None);
        assert_eq!(Filter::Active.query_param(), Some("active"));
        assert_eq!(Filter::Completed.query_param(), Some("completed"));
    }

    #[test]
    fn wire_form_is_a_bare_json_string() {
        let json = serde_json::to_string(&Filter::Active).unwrap();
        assert_eq!(json, "\"active\"");
        let decoded: Filter = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Filter::Active);
    }
}
