//! Form validation and sanitization.
//!
//! A submission goes through two independent passes driven by a [`FormRules`]
//! table: the checks, which collect at most one message per field in table
//! order, and the sanitizers, which trim, escape and coerce every value. The
//! entity is always rebuilt from the sanitized values so an invalid form can
//! be shown again pre-filled.

pub mod rules;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use validator::ValidateLength;

use crate::store::RecordId;

/// One submitted field: a single value, or several for repeated keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Raw form submission, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    fields: HashMap<String, FormValue>,
}

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `key=value` pairs; repeated keys become a list
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (key, value) in pairs {
            form.push(key.into(), value.into());
        }
        form
    }

    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.push(field.to_string(), value.to_string());
        self
    }

    fn push(&mut self, field: String, value: String) {
        match self.fields.remove(&field) {
            None => {
                self.fields.insert(field, FormValue::Single(value));
            }
            Some(FormValue::Single(first)) => {
                self.fields.insert(field, FormValue::Multiple(vec![first, value]));
            }
            Some(FormValue::Multiple(mut values)) => {
                values.push(value);
                self.fields.insert(field, FormValue::Multiple(values));
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&FormValue> {
        self.fields.get(field)
    }

    /// Every value of a field, trimmed; an absent field reads as one empty value
    fn values(&self, field: &str) -> Vec<&str> {
        match self.fields.get(field) {
            None => vec![""],
            Some(FormValue::Single(value)) => vec![value.trim()],
            Some(FormValue::Multiple(values)) => values.iter().map(|v| v.trim()).collect(),
        }
    }
}

/// Condition a field value must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    NonEmpty,
    /// Length in characters, inclusive bounds
    Length { min: u64, max: u64 },
    /// ASCII letters and digits only
    Alphanumeric,
    /// Empty, or an ISO-8601 date / date-time
    OptionalIsoDate,
    /// Empty, or one of the listed values
    OptionalOneOf(&'static [&'static str]),
}

impl CheckKind {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            CheckKind::NonEmpty => !value.is_empty(),
            CheckKind::Length { min, max } => value.validate_length(Some(*min), Some(*max), None),
            CheckKind::Alphanumeric => {
                !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
            }
            CheckKind::OptionalIsoDate => value.is_empty() || parse_iso_date(value).is_some(),
            CheckKind::OptionalOneOf(allowed) => value.is_empty() || allowed.contains(&value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub field: &'static str,
    pub kind: CheckKind,
    pub message: &'static str,
}

/// Value transform, applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    Trim,
    Escape,
    ToDate,
    ToList,
}

#[derive(Debug, Clone, Copy)]
pub struct SanitizeRule {
    pub field: &'static str,
    pub steps: &'static [Sanitizer],
}

/// Checks and sanitizers for one form
#[derive(Debug, Clone, Copy)]
pub struct FormRules {
    pub checks: &'static [Check],
    pub sanitizers: &'static [SanitizeRule],
}

/// A failed check, reported back on the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A sanitized field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanValue {
    Text(String),
    List(Vec<String>),
    Date(Option<NaiveDate>),
}

/// Sanitized submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanForm {
    values: HashMap<String, CleanValue>,
}

impl CleanForm {
    pub fn text(&self, field: &str) -> String {
        match self.values.get(field) {
            Some(CleanValue::Text(value)) => value.clone(),
            Some(CleanValue::List(values)) => values.first().cloned().unwrap_or_default(),
            Some(CleanValue::Date(date)) => crate::models::format_date(*date),
            None => String::new(),
        }
    }

    pub fn list(&self, field: &str) -> Vec<String> {
        match self.values.get(field) {
            Some(CleanValue::List(values)) => values.clone(),
            Some(CleanValue::Text(value)) if !value.is_empty() => vec![value.clone()],
            _ => Vec::new(),
        }
    }

    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        match self.values.get(field) {
            Some(CleanValue::Date(date)) => *date,
            Some(CleanValue::Text(value)) => parse_iso_date(value),
            _ => None,
        }
    }

    pub fn id(&self, field: &str) -> RecordId {
        RecordId::from(self.text(field))
    }

    pub fn ids(&self, field: &str) -> Vec<RecordId> {
        self.list(field).into_iter().map(RecordId::from).collect()
    }
}

/// Entity that can be rebuilt from a sanitized form
pub trait FormEntity: Sized {
    const RULES: FormRules;

    fn from_form(id: RecordId, form: &CleanForm) -> Self;
}

/// Outcome of running a submission through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<E> {
    Valid(E),
    Invalid { entity: E, errors: Vec<FieldError> },
}

/// Run every check; the first failing check of a field is its only error
pub fn validate(rules: &FormRules, form: &RawForm) -> Vec<FieldError> {
    let mut failed: HashSet<&str> = HashSet::new();
    let mut errors = Vec::new();

    for check in rules.checks {
        if failed.contains(check.field) {
            continue;
        }
        let ok = form.values(check.field).iter().all(|v| check.kind.accepts(v));
        if !ok {
            failed.insert(check.field);
            errors.push(FieldError {
                field: check.field.to_string(),
                message: check.message.to_string(),
            });
        }
    }
    errors
}

enum Working {
    Absent,
    Text(String),
    List(Vec<String>),
    Date(Option<NaiveDate>),
}

fn apply(step: Sanitizer, value: Working) -> Working {
    match (step, value) {
        (Sanitizer::Trim, Working::Text(s)) => Working::Text(s.trim().to_string()),
        (Sanitizer::Trim, Working::List(v)) => {
            Working::List(v.iter().map(|s| s.trim().to_string()).collect())
        }
        (Sanitizer::Escape, Working::Text(s)) => Working::Text(escape_markup(&s)),
        (Sanitizer::Escape, Working::List(v)) => {
            Working::List(v.iter().map(|s| escape_markup(s)).collect())
        }
        (Sanitizer::ToDate, Working::Text(s)) => Working::Date(parse_iso_date(&s)),
        (Sanitizer::ToDate, Working::List(v)) => {
            Working::Date(v.first().and_then(|s| parse_iso_date(s)))
        }
        (Sanitizer::ToDate, Working::Absent) => Working::Date(None),
        (Sanitizer::ToList, Working::Absent) => Working::List(Vec::new()),
        (Sanitizer::ToList, Working::Text(s)) => Working::List(vec![s]),
        (_, other) => other,
    }
}

/// Sanitize every field named in the rules, regardless of validation outcome
pub fn sanitize(rules: &FormRules, form: &RawForm) -> CleanForm {
    let mut values = HashMap::new();
    for rule in rules.sanitizers {
        let mut value = match form.get(rule.field) {
            None => Working::Absent,
            Some(FormValue::Single(s)) => Working::Text(s.clone()),
            Some(FormValue::Multiple(v)) => Working::List(v.clone()),
        };
        for step in rule.steps {
            value = apply(*step, value);
        }
        let clean = match value {
            Working::Absent => CleanValue::Text(String::new()),
            Working::Text(s) => CleanValue::Text(s),
            Working::List(v) => CleanValue::List(v),
            Working::Date(d) => CleanValue::Date(d),
        };
        values.insert(rule.field.to_string(), clean);
    }
    CleanForm { values }
}

/// Validate and sanitize a submission into an entity with the given id
pub fn process<E: FormEntity>(id: RecordId, form: &RawForm) -> Validated<E> {
    let errors = validate(&E::RULES, form);
    let entity = E::from_form(id, &sanitize(&E::RULES, form));
    if errors.is_empty() {
        Validated::Valid(entity)
    } else {
        Validated::Invalid { entity, errors }
    }
}

/// Replace markup-significant characters with HTML entities
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339
/// date-times. A year or a month reads as its first day.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    let bytes = value.as_bytes();
    match bytes.len() {
        4 if bytes.iter().all(u8::is_ascii_digit) => {
            return value
                .parse()
                .ok()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
        }
        7 if bytes[4] == b'-' => {
            return NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").ok();
        }
        _ => {}
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}
