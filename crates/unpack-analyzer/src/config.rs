//! Analyzer configuration.
//!
//! A plain value handed to the analyzer, never process-global. Hosts load
//! it from JSON; every field defaults so an empty object is a valid config.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Name patterns are exact matches, or prefix matches when the pattern ends
/// with `*` (`Props*` matches `PropsForDialog`).
fn pattern_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => pattern == name,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Generic wrapper types whose first type argument carries component
    /// props: a variable annotated `W<P>` with `W` in this list has its
    /// initializer's first parameter checked against `P`.
    pub component_types: Vec<String>,
    /// Call wrappers unwrapped to their first argument when locating the
    /// component function (`memo(...)`, `forwardRef(...)`).
    pub wrapper_calls: Vec<String>,
    /// Type names checked even when shared or exported.
    pub always_check: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> AnalyzerConfig {
        AnalyzerConfig {
            component_types: vec![
                "FC".to_string(),
                "FunctionComponent".to_string(),
                "VFC".to_string(),
                "VoidFunctionComponent".to_string(),
            ],
            wrapper_calls: vec!["memo".to_string(), "forwardRef".to_string()],
            always_check: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Reject malformed pattern lists up front; analysis itself never fails.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("component_types", &self.component_types),
            ("wrapper_calls", &self.wrapper_calls),
            ("always_check", &self.always_check),
        ];
        for (field, patterns) in fields {
            for pattern in patterns {
                ensure!(!pattern.is_empty(), "{field} entries must be non-empty");
                ensure!(
                    pattern.find('*').is_none_or(|at| at == pattern.len() - 1),
                    "{field} pattern '{pattern}' may only use a trailing '*'"
                );
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_component_type(&self, name: &str) -> bool {
        self.component_types.iter().any(|p| pattern_matches(p, name))
    }

    #[must_use]
    pub fn is_wrapper_call(&self, name: &str) -> bool {
        self.wrapper_calls.iter().any(|p| pattern_matches(p, name))
    }

    #[must_use]
    pub fn is_always_checked(&self, name: &str) -> bool {
        self.always_check.iter().any(|p| pattern_matches(p, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let config = AnalyzerConfig {
            always_check: vec![String::new()],
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interior_wildcard_rejected() {
        let config = AnalyzerConfig {
            always_check: vec!["a*b".to_string()],
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pattern_matching() {
        assert!(pattern_matches("FC", "FC"));
        assert!(!pattern_matches("FC", "FCX"));
        assert!(pattern_matches("Props*", "PropsForDialog"));
        assert!(pattern_matches("*", "anything"));
        assert!(!pattern_matches("Props*", "DialogProps"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AnalyzerConfig = serde_json::from_str("{}").unwrap();
        assert!(config.is_component_type("FC"));
        assert!(config.is_wrapper_call("memo"));
        assert!(!config.is_always_checked("Props"));
    }
}
