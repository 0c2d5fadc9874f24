//! Step domain model

use crate::preprocess::escape;
use serde::Serialize;

/// A single step call inside `steps { }`, a post condition or a wrapper step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// Step name, e.g. `sh` or `dir`
    pub name: String,

    /// Arguments in call order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<StepArg>,

    /// Escaped body of a block the preprocessor turned into a raw string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Steps wrapped by this one (`dir('x') { ... }`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Step>,
}

/// One argument of a step call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepArg {
    Unnamed(Value),
    Named { key: String, value: Value },
}

/// Literal value of a step argument
///
/// Strings keep the placeholder encoding; use [`Value::decoded`] for the text
/// as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Encoded string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as text with every placeholder decoded
    pub fn decoded(&self) -> String {
        match self {
            Value::String(s) => escape::decode(s),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
        }
    }

    /// Groovy literal for this value
    pub fn to_groovy(&self) -> String {
        match self {
            Value::String(s) if escape::is_triple_quoted(s) => format!("'''{}'''", escape::decode(s)),
            Value::String(s) => format!("'{}'", escape::decode(s)),
            other => other.decoded(),
        }
    }
}

impl StepArg {
    fn to_groovy(&self) -> String {
        match self {
            StepArg::Unnamed(value) => value.to_groovy(),
            StepArg::Named { key, value } => format!("{}: {}", key, value.to_groovy()),
        }
    }
}

impl Step {
    pub fn new(name: impl Into<String>, args: Vec<StepArg>) -> Self {
        Step {
            name: name.into(),
            args,
            body: None,
            nested: Vec::new(),
        }
    }

    /// Add wrapped steps
    pub fn with_nested(mut self, nested: Vec<Step>) -> Self {
        self.nested = nested;
        self
    }

    /// Attach an escaped block body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The only argument, if the step has exactly one and it is unnamed
    pub fn single_unnamed_arg(&self) -> Option<&Value> {
        match self.args.as_slice() {
            [StepArg::Unnamed(value)] => Some(value),
            _ => None,
        }
    }

    /// Value of a named argument
    pub fn named_arg(&self, key: &str) -> Option<&Value> {
        self.args.iter().find_map(|arg| match arg {
            StepArg::Named { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Reproduce the step as Groovy source
    pub fn to_groovy(&self) -> String {
        let mut out = self.name.clone();

        match self.args.as_slice() {
            [] if self.body.is_none() && self.nested.is_empty() => out.push_str("()"),
            [] => {}
            [single @ StepArg::Unnamed(_)] if self.body.is_none() && self.nested.is_empty() => {
                out.push(' ');
                out.push_str(&single.to_groovy());
            }
            args => {
                let rendered: Vec<String> = args.iter().map(StepArg::to_groovy).collect();
                out.push_str(&format!("({})", rendered.join(", ")));
            }
        }

        if let Some(body) = &self.body {
            out.push(' ');
            out.push_str(&escape::to_curly(body));
        }

        if !self.nested.is_empty() {
            out.push_str(" {\n");
            for step in &self.nested {
                for line in step.to_groovy().lines() {
                    out.push_str("  ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            out.push('}');
        }

        out
    }
}
