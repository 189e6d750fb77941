//! Character validation against declared creation rules.
//!
//! Cross-checks a character's attribute and skill blocks against the
//! categories the `character_creation` rule set declares. Hard errors
//! (a whole category absent, a value out of range) make the character
//! invalid; individually missing traits are soft warnings. The
//! character is never mutated.

use std::fmt;

use nocturne_core::{Character, RuleValue};
use serde::{Deserialize, Serialize};

use crate::rules::Resolver;

/// Attribute dots must fall in this range.
const ATTRIBUTE_RANGE: std::ops::RangeInclusive<i64> = 1..=5;
/// Skill ranks must fall in this range.
const SKILL_RANGE: std::ops::RangeInclusive<i64> = 0..=5;

/// A single finding from validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}", self.message)
    }
}

/// All findings from validating one character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every issue found, errors and warnings alike.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// A character is valid when no hard errors were found.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.is_error)
    }

    /// The hard errors.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.is_error)
    }

    /// The soft warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| !i.is_error)
    }

    fn error(&mut self, message: String) {
        self.issues.push(ValidationIssue {
            message,
            is_error: true,
        });
    }

    fn warning(&mut self, message: String) {
        self.issues.push(ValidationIssue {
            message,
            is_error: false,
        });
    }
}

/// Validate a character's traits against the `character_creation` rule
/// set. Absent creation rules produce a lone warning and a valid
/// report.
pub fn validate_character(resolver: &Resolver, character: &Character) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(rules) = resolver.rules().rule_set("character_creation") else {
        report.warning("character creation rules not found".to_string());
        return report;
    };

    validate_block(
        &mut report,
        rules.get("attributes").and_then(|a| a.get("categories")),
        &character.attributes,
        "attributes",
        &ATTRIBUTE_RANGE,
        |name| name.to_lowercase(),
    );
    validate_block(
        &mut report,
        rules.get("skills").and_then(|s| s.get("categories")),
        &character.skills,
        "skills",
        &SKILL_RANGE,
        |name| name.to_lowercase().replace(' ', "_"),
    );

    report
}

/// Validate one trait block (attributes or skills) against its declared
/// categories.
fn validate_block(
    report: &mut ValidationReport,
    categories: Option<&RuleValue>,
    traits: &std::collections::HashMap<String, i64>,
    block: &str,
    range: &std::ops::RangeInclusive<i64>,
    normalize: impl Fn(&str) -> String,
) {
    let Some(categories) = categories.and_then(RuleValue::as_table) else {
        return;
    };

    for (category, members) in categories {
        let names: Vec<String> = members
            .as_list()
            .map(|list| {
                list.iter()
                    .filter_map(RuleValue::as_str)
                    .map(&normalize)
                    .collect()
            })
            .unwrap_or_default();
        if names.is_empty() {
            continue;
        }

        // With flat trait maps, a category counts as present when any
        // of its traits appear on the character.
        if !names.iter().any(|n| traits.contains_key(n)) {
            report.error(format!("missing {category} {block}"));
            continue;
        }

        for name in &names {
            match traits.get(name) {
                None => report.warning(format!("missing {name} in {category} {block}")),
                Some(value) if !range.contains(value) => report.error(format!(
                    "invalid {name} value: {value} (must be {}-{})",
                    range.start(),
                    range.end()
                )),
                Some(_) => {}
            }
        }
    }
}
