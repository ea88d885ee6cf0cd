//! Placeholder extraction and substitution
//!
//! Templates carry placeholders of the form `{$name}` (required) or
//! `{$name:default}` (optional). The separator `:` alone marks a field as
//! optional, so `{$name:}` is optional with an empty default.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\$([^}]*)\}").expect("Invalid placeholder regex"));

/// Fields keyed by name, in a stable order for prompting.
pub type Fields = BTreeMap<String, Field>;

/// A named, user-suppliable value referenced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Text shown when asking the user for a value
    pub prompt: String,
    pub is_optional: bool,
    /// Only meaningful when `is_optional`
    pub default: String,
    /// Set at call time
    pub value: Option<String>,
}

impl Field {
    pub fn required(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            prompt: format!("${} (required)", name),
            name,
            is_optional: false,
            default: String::new(),
            value: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        let name = name.into();
        let default = default.into();
        Self {
            prompt: format!("${} (default: {})", name, default),
            name,
            is_optional: true,
            default,
            value: None,
        }
    }

    /// The placeholder text this field was extracted from.
    pub fn placeholder(&self) -> String {
        if self.is_optional {
            format!("{{${}:{}}}", self.name, self.default)
        } else {
            format!("{{${}}}", self.name)
        }
    }

    /// The value substituted for this field.
    ///
    /// Optional fields fall back to their default; required fields must
    /// have been given a value.
    pub fn resolved(&self) -> Result<&str> {
        match (&self.value, self.is_optional) {
            (Some(value), _) => Ok(value),
            (None, true) => Ok(&self.default),
            (None, false) => Err(Error::MissingValue {
                name: self.name.clone(),
            }),
        }
    }
}

fn parse_placeholder(inner: &str) -> Field {
    match inner.split_once(':') {
        Some((name, default)) => Field::optional(name, default),
        None => Field::required(inner),
    }
}

/// Extract every placeholder of `template` as a field.
///
/// A name repeated within the same template keeps its last declaration.
pub fn extract_fields(template: &str) -> Fields {
    let mut fields = Fields::new();
    for captures in PLACEHOLDER.captures_iter(template) {
        let field = parse_placeholder(&captures[1]);
        fields.insert(field.name.clone(), field);
    }
    fields
}

/// Merge `other` into `into`; later declarations overwrite earlier ones.
pub fn merge_fields(into: &mut Fields, other: Fields) {
    into.extend(other);
}

/// Substitute every placeholder of `template` with its field value.
///
/// A placeholder matches a field only when it is spelled exactly as the
/// field's own placeholder, so after a last-wins merge `{$id}` and
/// `{$id:7}` cannot both resolve against the same field.
///
/// Substitution is a single left-to-right pass: text coming from a value is
/// never scanned for placeholders again.
///
/// # Errors
///
/// `MalformedTemplate` when a placeholder names no field or its spelling
/// disagrees with the field, `MissingValue` when a required field has no
/// value.
pub fn resolve_template(template: &str, fields: &Fields) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let whole = captures.get(0).map_or(0..0, |m| m.range());
        let name = captures[1].split(':').next().unwrap_or_default();

        let field = fields
            .get(name)
            .filter(|field| field.placeholder() == captures[0])
            .ok_or_else(|| Error::MalformedTemplate {
                placeholder: captures[0].to_string(),
            })?;

        out.push_str(&template[last..whole.start]);
        out.push_str(field.resolved()?);
        last = whole.end;
    }

    out.push_str(&template[last..]);
    Ok(out)
}
