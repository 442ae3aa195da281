//! Prompt rendering.
//!
//! Placeholders are `{name}` where `name` is a key of the variable map.
//! Rendering is one left-to-right pass over the template: injected values are
//! copied out verbatim and never scanned again, so values containing braces
//! (JSON in particular) cannot trigger further substitution. Brace pairs that
//! do not name a known key are kept as written.

use serde_json::Value;
use std::collections::BTreeMap;

/// Named values available to a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptContext {
    vars: BTreeMap<String, Value>,
}

impl PromptContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Look up a variable in its rendered form.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).map(value_to_prompt_text)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true when no variable is set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Render a template against this context.
    pub fn render(&self, template: &str) -> String {
        render(template, &self.vars)
    }
}

impl<K: Into<String>> Extend<(K, Value)> for PromptContext {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.vars.insert(key.into(), value);
        }
    }
}

/// String form of a value inside a prompt.
///
/// Strings are inserted without quotes, null as nothing, everything else as
/// compact JSON.
pub fn value_to_prompt_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Substitute `{key}` placeholders in `template`.
///
/// # Examples
///
/// ```
/// use feuilleton_narrative::render;
/// use serde_json::{Value, json};
/// use std::collections::BTreeMap;
///
/// let mut vars = BTreeMap::new();
/// vars.insert("world".to_string(), Value::String(r#"{"a": 1}"#.to_string()));
/// vars.insert("a".to_string(), json!("never used"));
///
/// assert_eq!(render("World: {world} {missing}", &vars), r#"World: {"a": 1} {missing}"#);
/// ```
pub fn render(template: &str, vars: &BTreeMap<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let substituted = after_open.find('}').and_then(|close| {
            let key = &after_open[..close];
            vars.get(key).map(|value| (close, value))
        });

        match substituted {
            Some((close, value)) => {
                out.push_str(&value_to_prompt_text(value));
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}
