//! Form definitions and the collaborators the form block renderer needs.
//!
//! Form storage and CSRF token issuing live outside the renderer; hosts
//! plug them in through [`FormRepository`] and [`CsrfTokenSource`].

use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Looks up stored form definitions by id.
pub trait FormRepository: Send + Sync {
    /// The form with `id`, or `None` when no such form exists.
    fn find_form(&self, id: &str) -> Result<Option<FormDefinition>>;
}

/// Issues the CSRF token embedded in rendered forms.
pub trait CsrfTokenSource: Send + Sync {
    fn current_token(&self) -> Result<String>;
}

/// A stored form as the form block renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefinition {
    /// URL-safe form name; submissions go to `{base}/{slug}/submit`.
    pub slug: String,

    #[serde(default)]
    pub status: FormStatus,

    #[serde(default)]
    pub fields: Vec<FormField>,

    #[serde(default)]
    pub settings: FormSettings,
}

impl FormDefinition {
    pub fn is_active(&self) -> bool {
        self.status == FormStatus::Active
    }
}

/// Publication status of a form. Only active forms render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Active,
    #[default]
    Inactive,
    #[serde(other)]
    Unknown,
}

/// A single form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(rename = "type", default)]
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub options: FieldOptions,
}

/// Field control type.
///
/// Stored as a plain string; anything other than `textarea`, `select` and
/// `checkbox` becomes an `<input>` of that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Textarea,
    Select,
    Checkbox,
    Input(String),
}

impl Default for FieldKind {
    fn default() -> Self {
        FieldKind::Input("text".to_string())
    }
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "textarea" => FieldKind::Textarea,
            "select" => FieldKind::Select,
            "checkbox" => FieldKind::Checkbox,
            _ => FieldKind::Input(s),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Textarea => "textarea".to_string(),
            FieldKind::Select => "select".to_string(),
            FieldKind::Checkbox => "checkbox".to_string(),
            FieldKind::Input(s) => s,
        }
    }
}

impl FieldKind {
    /// The `type` attribute for an `<input>`, restricted to
    /// `[A-Za-z0-9-]` and falling back to `text`.
    pub fn input_type(&self) -> &str {
        match self {
            FieldKind::Input(s)
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') =>
            {
                s
            }
            FieldKind::Checkbox => "checkbox",
            _ => "text",
        }
    }
}

/// Select options, stored either as a list or a comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOptions {
    List(Vec<String>),
    Csv(String),
    /// Any other stored shape; yields no options.
    Other(serde_json::Value),
}

impl Default for FieldOptions {
    fn default() -> Self {
        FieldOptions::List(Vec::new())
    }
}

impl FieldOptions {
    /// Trimmed, non-empty option values in stored order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldOptions::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
            FieldOptions::Csv(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
            FieldOptions::Other(_) => Vec::new(),
        }
    }
}

/// Per-form presentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

/// In-memory form repository keyed by form id.
#[derive(Debug, Clone, Default)]
pub struct StaticFormRepository {
    forms: HashMap<String, FormDefinition>,
}

impl StaticFormRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON object mapping form id to definition.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let forms: HashMap<String, FormDefinition> = serde_json::from_str(json)?;
        Ok(Self { forms })
    }

    /// Add or replace a form.
    pub fn insert(&mut self, id: impl Into<String>, form: FormDefinition) {
        self.forms.insert(id.into(), form);
    }

    pub fn with_form(mut self, id: impl Into<String>, form: FormDefinition) -> Self {
        self.insert(id, form);
        self
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl FormRepository for StaticFormRepository {
    fn find_form(&self, id: &str) -> Result<Option<FormDefinition>> {
        Ok(self.forms.get(id).cloned())
    }
}

/// A CSRF token source that always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticCsrfToken(pub String);

impl CsrfTokenSource for StaticCsrfToken {
    fn current_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
