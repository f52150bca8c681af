//! Declarative field validation. A [Schema] is an ordered list of fields, each with a closed set
//! of [Rule]s that are evaluated by the same engine regardless of the entity being validated.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

pub use self::rules::{Predicate, Rule};

/// Rule definitions and their checks
mod rules;
/// Schemas of every form in the app
pub mod schemas;

/// Raw value held by a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text input, select or textarea
    Text(String),
    /// Multi select of ids
    List(Vec<String>),
}

impl FieldValue {
    /// True when the value carries no user input. Whitespace only text counts as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// Text of a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Items of a list value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Current values of a form keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<&'static str, FieldValue>);

impl FormValues {
    /// No values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert, used to describe initial values
    #[must_use]
    pub fn with<V: Into<FieldValue>>(mut self, name: &'static str, value: V) -> Self {
        self.0.insert(name, value.into());
        self
    }

    /// Set the value of `name`, replacing any previous one
    pub fn insert<V: Into<FieldValue>>(&mut self, name: &'static str, value: V) {
        self.0.insert(name, value.into());
    }

    /// Value of `name` if present
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Value of `name` for in place updates
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(name)
    }

    /// Text content of the field `name`. Missing or list fields read as an empty string.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or_default()
    }

    /// Items of the list field `name`. Missing or text fields read as an empty slice.
    pub fn list(&self, name: &str) -> &[String] {
        self.get(name).and_then(FieldValue::as_list).unwrap_or_default()
    }

    /// True when `name` has a value of either kind
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// Ambient inputs that rules may depend on. Kept explicit so date based rules are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Date that date rules treat as today
    pub today: NaiveDate,
}

impl ValidationContext {
    /// Context using the local date of the running client
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Context pinned to `today`
    pub const fn for_date(today: NaiveDate) -> Self {
        Self { today }
    }
}

/// Field level error messages in schema order. An empty collection means the values are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<(&'static str, &'static str)>);

impl ValidationErrors {
    /// Message of `field`, [None] when it is valid
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }

    /// True when every field is valid
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First failing field, following the order fields were declared in the schema
    pub fn first(&self) -> Option<(&'static str, &'static str)> {
        self.0.first().copied()
    }

    /// Field name and message pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().copied()
    }
}

/// Shape of the value a field holds when the form starts out empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Starts as empty text
    Text,
    /// Starts as an empty list
    List,
}

/// One declared field and the rules it must satisfy
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Key of the field in [FormValues]
    pub name: &'static str,
    /// Shape of the empty value
    pub kind: FieldKind,
    /// Checked in order, the first failure wins
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    /// Run the rules of this field against `value`, returning the first failure message. Blank
    /// values only answer to [Rule::Required], every other rule is skipped for them.
    pub fn check(&self, value: Option<&FieldValue>, context: &ValidationContext) -> Option<&'static str> {
        let blank = value.map_or(true, FieldValue::is_blank);
        if blank {
            return self.rules.iter().find_map(|rule| match rule {
                Rule::Required { message } => Some(*message),
                _ => None,
            });
        }
        let value = value?;
        self.rules
            .iter()
            .find_map(|rule| rule.check(value, context).err())
    }

    /// Value of the field before any input
    const fn empty_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::List => FieldValue::List(Vec::new()),
        }
    }
}

/// Ordered set of field rules describing one entity form
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Fields in declaration order
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Schema without fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a text field
    #[must_use]
    pub fn text(mut self, name: &'static str, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldSchema {
            name,
            kind: FieldKind::Text,
            rules,
        });
        self
    }

    /// Declare a list field
    #[must_use]
    pub fn list(mut self, name: &'static str, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldSchema {
            name,
            kind: FieldKind::List,
            rules,
        });
        self
    }

    /// Declaration of `name`
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Names of the declared fields in order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Values for every declared field, empty text or an empty list depending on the field kind
    pub fn empty_values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in &self.fields {
            values.insert(field.name, field.empty_value());
        }
        values
    }

    /// Complete `initial` with empty values for any declared field it does not contain
    pub fn fill_defaults(&self, mut initial: FormValues) -> FormValues {
        for field in &self.fields {
            if !initial.contains(field.name) {
                initial.insert(field.name, field.empty_value());
            }
        }
        initial
    }

    /// Validate every declared field of `values`
    pub fn validate(&self, values: &FormValues, context: &ValidationContext) -> ValidationErrors {
        let errors = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .check(values.get(field.name), context)
                    .map(|message| (field.name, message))
            })
            .collect();
        ValidationErrors(errors)
    }
}
