//! Parse results handed to actions.
//!
//! [`ParsedCommand`] is the single payload an action receives: bound
//! arguments, coerced options and any dynamic leftovers. Maps are ordered
//! so repeated parses of the same argv produce identical results, byte for
//! byte when serialized.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::spec::ValueKind;

/// A coerced option value. Serializes untagged, so JSON output carries the
/// raw value (`true`, `3`, `"staging"`) rather than an enum wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// The declared kind this value satisfies.
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::Bool(_) => ValueKind::Bool,
            OptionValue::Number(_) => ValueKind::Number,
            OptionValue::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

/// Fully bound invocation of one command, ready for its action.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedCommand {
    /// Declared positionals by name, bound from argv or defaults.
    pub args: BTreeMap<String, String>,
    /// Declared options by name, coerced to their declared kind.
    pub options: BTreeMap<String, OptionValue>,
    /// Leftover positionals, verbatim. Present only when the command
    /// opted in to dynamic arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_args: Option<Vec<String>>,
    /// Leftover option tokens. Bare flags become `true`, inline values
    /// stay text. Present only when the command opted in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_options: Option<BTreeMap<String, OptionValue>>,
}

impl ParsedCommand {
    /// Bound value of a declared argument.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// Coerced value of a declared option.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Text option shortcut.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(OptionValue::as_text)
    }

    /// Number option shortcut.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.options.get(name).and_then(OptionValue::as_number)
    }

    /// Boolean option shortcut. Absent reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.options
            .get(name)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    }

    /// Machine-readable view of the whole parse, handy for `--json` style
    /// output in actions.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_serialize_raw() {
        assert_eq!(
            serde_json::to_string(&OptionValue::Bool(true)).unwrap(),
            "true"
        );
        assert_eq!(
            serde_json::to_string(&OptionValue::Number(3.0)).unwrap(),
            "3.0"
        );
        assert_eq!(
            serde_json::to_string(&OptionValue::Text("prod".into())).unwrap(),
            "\"prod\""
        );
    }

    #[test]
    fn accessors_match_kinds() {
        let mut parsed = ParsedCommand::default();
        parsed.args.insert("target".into(), "prod".into());
        parsed
            .options
            .insert("env".into(), OptionValue::Text("staging".into()));
        parsed
            .options
            .insert("retries".into(), OptionValue::Number(3.0));
        parsed.options.insert("force".into(), OptionValue::Bool(true));

        assert_eq!(parsed.arg("target"), Some("prod"));
        assert_eq!(parsed.text("env"), Some("staging"));
        assert_eq!(parsed.number("retries"), Some(3.0));
        assert!(parsed.flag("force"));
        assert!(!parsed.flag("missing"));
        assert_eq!(parsed.text("retries"), None);
    }

    #[test]
    fn dynamic_fields_skip_when_absent() {
        let parsed = ParsedCommand::default();
        let json = parsed.to_json();
        assert!(json.get("dynamic_args").is_none());
        assert!(json.get("dynamic_options").is_none());
    }

    #[test]
    fn display_renders_bare_values() {
        assert_eq!(OptionValue::Bool(false).to_string(), "false");
        assert_eq!(OptionValue::Number(3.0).to_string(), "3");
        assert_eq!(OptionValue::Text("us-east-1".into()).to_string(), "us-east-1");
    }
}
