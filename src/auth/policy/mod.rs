//! Policy engine
//!
//! Answers allow/deny queries against a declarative `(role, resource-pattern, action)` rule set
//! loaded from a policy file at startup.

mod engine;
mod parser;
mod types;

pub use engine::{FilePolicyEngine, PolicyEngine};
#[cfg(test)]
pub use engine::MockPolicyEngine;
pub use parser::parse_policy;
pub use types::{PolicyRule, PolicySet, ResourcePattern};
