//! Reports
//!
//! A failed evaluation yields a [`Requirement`]: the condition that would
//! have made the validator pass. It is a disjunction of [`ReportEntry`]
//! leaves, each naming a member, an already polarity-aware operator phrase
//! and the operand. A [`Formatter`] turns it into text; [`EnglishFormatter`]
//! is the built-in one.
//!
//! ```text
//! field1 of level1 must be in range [10, 20, 30, 40, 50]
//! field1 must be greater than 100 OR field2 must be equal to 1
//! ```

use std::borrow::Cow;

use crate::config::{MemberStyle, ReportConfig};
use crate::foundation::{ValidationError, Value};
use crate::path::{Arg, Aggregation, Key, Path};

// ============================================================================
// REQUIREMENTS
// ============================================================================

/// Report form of an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum OperandDescription {
    /// A plain value.
    Value(Value),
    /// Another member of the validated object.
    Member(Path),
    /// The same member of a sample object.
    Sample {
        /// Member path on the sample.
        path: Path,
        /// Display name of the sample.
        name: Option<Cow<'static, str>>,
    },
}

/// One unmet condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Member the condition is about, wildcards kept.
    pub path: Path,
    /// Operator name.
    pub operator: Cow<'static, str>,
    /// Phrase such as "must be greater than", already negated if needed.
    pub description: Cow<'static, str>,
    /// Operand, `None` when the phrase is complete on its own.
    pub operand: Option<OperandDescription>,
}

/// What the object must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// A single condition.
    Leaf(ReportEntry),
    /// At least one of the alternatives.
    Either(Vec<Requirement>),
}

impl Requirement {
    /// Disjunction of `alternatives`, flattened and deduplicated.
    ///
    /// Returns `None` for no alternatives and the alternative itself when
    /// only one is left.
    #[must_use]
    pub fn either(alternatives: impl IntoIterator<Item = Requirement>) -> Option<Self> {
        let mut flat: Vec<Requirement> = Vec::new();
        for alternative in alternatives {
            match alternative {
                Self::Either(nested) => {
                    for item in nested {
                        if !flat.contains(&item) {
                            flat.push(item);
                        }
                    }
                }
                leaf => {
                    if !flat.contains(&leaf) {
                        flat.push(leaf);
                    }
                }
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(Self::Either(flat)),
        }
    }

    /// Leaves in order.
    #[must_use]
    pub fn entries(&self) -> Vec<&ReportEntry> {
        match self {
            Self::Leaf(entry) => vec![entry],
            Self::Either(items) => items.iter().flat_map(Requirement::entries).collect(),
        }
    }
}

// ============================================================================
// FORMATTER
// ============================================================================

/// Renders requirements to text.
///
/// Implement [`member`](Formatter::member) and
/// [`operand`](Formatter::operand) to plug in another language; the
/// composition methods have English-neutral defaults.
pub trait Formatter {
    /// Renders a member path.
    fn member(&self, path: &Path) -> String;

    /// Renders an operand.
    fn operand(&self, operand: &OperandDescription) -> String;

    /// Renders one condition.
    fn entry(&self, entry: &ReportEntry) -> String {
        let mut out = format!("{} {}", self.member(&entry.path), entry.description);
        if let Some(operand) = &entry.operand {
            out.push(' ');
            out.push_str(&self.operand(operand));
        }
        out
    }

    /// Word joining alternatives.
    fn or(&self) -> &str {
        "OR"
    }

    /// Renders a requirement.
    fn requirement(&self, requirement: &Requirement) -> String {
        match requirement {
            Requirement::Leaf(entry) => self.entry(entry),
            Requirement::Either(items) => {
                let separator = format!(" {} ", self.or());
                items
                    .iter()
                    .map(|item| self.requirement(item))
                    .collect::<Vec<_>>()
                    .join(&separator)
            }
        }
    }
}

/// Plain English rendering.
#[derive(Debug, Clone, Default)]
pub struct EnglishFormatter {
    config: ReportConfig,
}

impl EnglishFormatter {
    /// Formatter with the given options.
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    fn segment(path: &Path, index: usize) -> String {
        if let Some(name) = path.name(index) {
            return name.to_owned();
        }
        match &path.keys()[index] {
            Key::Name(name) => name.to_string(),
            Key::Index(i) => format!("element #{i}"),
            Key::Property(property) if property.args.is_empty() => property.name.to_string(),
            Key::Property(property) => {
                let args: Vec<String> = property.args.iter().map(render_arg).collect();
                format!("{}({})", property.name, args.join(", "))
            }
            Key::All => "each element".to_owned(),
            Key::Any => "at least one element".to_owned(),
        }
    }

    fn dotted(path: &Path) -> String {
        let mut out = String::new();
        for (index, key) in path.keys().iter().enumerate() {
            if let Some(name) = path.name(index) {
                if index > 0 {
                    out.push('.');
                }
                out.push_str(name);
                continue;
            }
            match key {
                Key::Name(_) | Key::Property(_) if index > 0 => {
                    out.push('.');
                    out.push_str(&key.to_string());
                }
                _ => out.push_str(&key.to_string()),
            }
        }
        out
    }

    fn value(&self, value: &Value) -> String {
        match value {
            Value::Str(s) if self.config.quote_strings => format!("\"{s}\""),
            other => other.to_string(),
        }
    }
}

fn render_arg(arg: &Arg) -> String {
    match arg {
        Arg::Value(value) => value.to_string(),
        Arg::Each {
            aggregation: Aggregation::All,
            ..
        } => "each".to_owned(),
        Arg::Each {
            aggregation: Aggregation::Any,
            ..
        } => "any".to_owned(),
    }
}

impl Formatter for EnglishFormatter {
    fn member(&self, path: &Path) -> String {
        if path.is_empty() {
            return "value".to_owned();
        }
        match self.config.member_style {
            MemberStyle::Dotted => Self::dotted(path),
            MemberStyle::Of => (0..path.len())
                .rev()
                .map(|index| Self::segment(path, index))
                .collect::<Vec<_>>()
                .join(" of "),
        }
    }

    fn operand(&self, operand: &OperandDescription) -> String {
        match operand {
            OperandDescription::Value(value) => self.value(value),
            OperandDescription::Member(path) => self.member(path),
            OperandDescription::Sample { path, name } => format!(
                "{} of {}",
                self.member(path),
                name.as_deref().unwrap_or("sample")
            ),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Builds the structured error for a failed requirement.
///
/// A single condition uses the operator name as code and the dotted member
/// path as field; a disjunction uses `any_of` and lists each alternative as
/// a nested error.
#[must_use]
pub fn to_error(requirement: &Requirement, formatter: &dyn Formatter) -> ValidationError {
    let message = formatter.requirement(requirement);
    match requirement {
        Requirement::Leaf(entry) => entry_error(entry, message, formatter),
        Requirement::Either(items) => ValidationError::new("any_of", message).with_nested(
            items
                .iter()
                .map(|item| to_error(item, formatter))
                .collect(),
        ),
    }
}

fn entry_error(entry: &ReportEntry, message: String, formatter: &dyn Formatter) -> ValidationError {
    let mut error = ValidationError::new(entry.operator.clone(), message);
    if !entry.path.is_empty() {
        error = error.with_field(EnglishFormatter::dotted(&entry.path));
    }
    if let Some(operand) = &entry.operand {
        error = error.with_param("operand", formatter.operand(operand));
    }
    error
}
