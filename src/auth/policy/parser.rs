//! Policy file parser

use super::types::{PolicyRule, PolicySet, ResourcePattern};
use crate::utils::error::{ApiError, Result};

/// Parse `p, <role>, <resource-pattern>, <action>` lines.
///
/// Blank lines and `#` comments are skipped; anything else is an error naming the line.
pub fn parse_policy(text: &str) -> Result<PolicySet> {
    let mut rules = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.as_slice() {
            ["p", role, resource, action]
                if !role.is_empty() && !resource.is_empty() && !action.is_empty() =>
            {
                rules.push(PolicyRule {
                    role: role.to_string(),
                    resource: ResourcePattern::new(resource)?,
                    action: action.to_ascii_lowercase(),
                });
            }
            _ => {
                return Err(ApiError::config(format!(
                    "policy line {}: expected 'p, role, resource, action', got '{}'",
                    index + 1,
                    line
                )));
            }
        }
    }

    Ok(PolicySet::new(rules))
}
