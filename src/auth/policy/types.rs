//! Policy type definitions

use crate::utils::error::{ApiError, Result};
use regex::Regex;

/// Compiled resource pattern.
///
/// `*` matches any run of characters (including `/`), `:name` and `{name}` match exactly one
/// path segment, everything else is literal.
#[derive(Debug, Clone)]
pub struct ResourcePattern {
    source: String,
    regex: Regex,
}

impl ResourcePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let body = pattern
            .split('/')
            .map(|segment| {
                let is_param = segment.len() > 1
                    && (segment.starts_with(':')
                        || (segment.starts_with('{') && segment.ends_with('}')));
                if is_param {
                    "[^/]+".to_string()
                } else {
                    regex::escape(segment).replace(r"\*", ".*")
                }
            })
            .collect::<Vec<_>>()
            .join("/");

        let regex = Regex::new(&format!("^{}$", body)).map_err(|e| {
            ApiError::config(format!("invalid resource pattern '{}': {}", pattern, e))
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, resource: &str) -> bool {
        self.regex.is_match(resource)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Single allow rule
#[derive(Debug, Clone)]
pub struct PolicyRule {
    pub role: String,
    pub resource: ResourcePattern,
    /// Lower-cased HTTP verb, or `*`
    pub action: String,
}

impl PolicyRule {
    pub fn matches(&self, role: &str, resource: &str, action: &str) -> bool {
        self.role == role
            && (self.action == "*" || self.action.eq_ignore_ascii_case(action))
            && self.resource.matches(resource)
    }
}

/// Ordered, read-only rule collection
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    rules: Vec<PolicyRule>,
}

impl PolicySet {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Allowed iff at least one rule matches; absence of a rule is a deny.
    pub fn allows(&self, role: &str, resource: &str, action: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.matches(role, resource, action))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
