//! Validation System - Size Table Checks
//!
//! Rules produce structured violations.
//! Errors block an export; warnings are reported and logged.

use serde::{Deserialize, Serialize};

use crate::catalog::{SizeTable, MAX_PIXEL_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    /// Table positions involved, in table order.
    pub entries: Vec<usize>,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<ValidationViolation>) -> Self {
        let valid = !violations.iter().any(|v| v.severity == ViolationSeverity::Error);
        Self { valid, violations }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Warning)
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, table: &SizeTable) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

pub struct NonEmptyRule;

impl ValidationRule for NonEmptyRule {
    fn name(&self) -> &'static str { "non_empty" }

    fn validate(&self, table: &SizeTable) -> Vec<ValidationViolation> {
        if !table.is_empty() {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Error,
            message: "Size table has no entries".to_string(),
            entries: vec![],
            remediation: vec!["Add at least one {size, scale} pair".to_string()],
        }]
    }
}

pub struct PositiveDimensionsRule;

impl ValidationRule for PositiveDimensionsRule {
    fn name(&self) -> &'static str { "positive_dimensions" }

    fn validate(&self, table: &SizeTable) -> Vec<ValidationViolation> {
        table
            .specs()
            .iter()
            .enumerate()
            .filter_map(|(i, spec)| {
                let problem = if !spec.size.is_finite() || spec.size <= 0.0 {
                    format!("Logical size {} is not a positive number", spec.size)
                } else if spec.scale == 0 {
                    "Scale must be at least 1".to_string()
                } else if spec.pixel_size() == 0 {
                    format!("{}@{} rounds to zero pixels", spec.size, spec.scale_label())
                } else {
                    return None;
                };
                Some(ValidationViolation {
                    rule: self.name().to_string(),
                    severity: ViolationSeverity::Error,
                    message: problem,
                    entries: vec![i],
                    remediation: vec!["Fix or remove the entry".to_string()],
                })
            })
            .collect()
    }
}

/// The master is rendered at the largest size, so one oversized entry would
/// make the whole export allocate an unbounded canvas.
pub struct MaxDimensionRule;

impl ValidationRule for MaxDimensionRule {
    fn name(&self) -> &'static str { "max_dimension" }

    fn validate(&self, table: &SizeTable) -> Vec<ValidationViolation> {
        table
            .specs()
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.pixel_size() > MAX_PIXEL_SIZE)
            .map(|(i, spec)| ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: format!(
                    "{}@{} is {}px, above the {}px limit",
                    spec.size,
                    spec.scale_label(),
                    spec.pixel_size(),
                    MAX_PIXEL_SIZE
                ),
                entries: vec![i],
                remediation: vec![format!("Keep size x scale at or below {}", MAX_PIXEL_SIZE)],
            })
            .collect()
    }
}

/// Specs that resolve to the same pixel size write the same file. The last
/// one written wins; this rule makes the overlap visible.
pub struct PixelCollisionRule;

impl ValidationRule for PixelCollisionRule {
    fn name(&self) -> &'static str { "pixel_collision" }

    fn validate(&self, table: &SizeTable) -> Vec<ValidationViolation> {
        table
            .collisions()
            .into_iter()
            .filter(|(px, _)| *px > 0)
            .map(|(px, entries)| {
                let labels: Vec<_> = entries
                    .iter()
                    .map(|&i| {
                        let spec = &table.specs()[i];
                        format!("{}@{}", spec.size, spec.scale_label())
                    })
                    .collect();
                ValidationViolation {
                    rule: self.name().to_string(),
                    severity: ViolationSeverity::Warning,
                    message: format!(
                        "{} all resolve to icon_{}x{}.png; the last entry's write wins",
                        labels.join(", "),
                        px,
                        px
                    ),
                    entries,
                    remediation: vec!["Expected for shared iOS sizes; otherwise adjust the table".to_string()],
                }
            })
            .collect()
    }
}

/// Validator runs every rule over a table
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NonEmptyRule),
                Box::new(PositiveDimensionsRule),
                Box::new(MaxDimensionRule),
                Box::new(PixelCollisionRule),
            ],
        }
    }

    pub fn validate(&self, table: &SizeTable) -> ValidationResult {
        let violations = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(table))
            .collect();
        ValidationResult::from_violations(violations)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
