//! The tagged result envelope and its owned payload types.
//!
//! Every value returned from an invocation is wrapped in an [`Envelope`].
//! The discriminator is the enum tag itself, so rendering and release can
//! never consult the wrong type information: dropping an envelope frees
//! every owned string exactly once, and [`Envelope::render`] and
//! [`Envelope::flatten`] dispatch on the variant alone, never on the shape
//! of the contents.

use serde::Serialize;
use std::fmt;

/// Field name used for an object's synthetic leading name field.
pub const OBJECT_NAME: &str = "name";

/// One action row: the first parameter conventionally names the action,
/// the rest are its arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub params: Vec<String>,
}

impl Action {
    pub fn name(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

/// A typed object field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// A named field of an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectField {
    pub name: String,
    #[serde(flatten)]
    pub value: FieldValue,
}

/// One object row: an ordered sequence of named, typed fields. The row's
/// first element is carried as a leading [`OBJECT_NAME`] field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Object {
    pub fields: Vec<ObjectField>,
}

impl Object {
    /// The object's name, when the leading synthetic name field is present.
    pub fn name(&self) -> Option<&str> {
        match self.fields.first() {
            Some(ObjectField {
                name,
                value: FieldValue::Text(text),
            }) if name == OBJECT_NAME => Some(text),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }
}

/// A direct, non-list return value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
    /// The return slot was left unbound: the query bound no value.
    Unit,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{}", value),
            Scalar::Text(text) => write!(f, "{}", text),
            Scalar::Unit => write!(f, "<no value>"),
        }
    }
}

/// The discriminated container wrapping every producible result kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Envelope {
    Actions(Vec<Action>),
    Objects(Vec<Object>),
    Exception(String),
    Scalar(Scalar),
}

impl Envelope {
    pub fn is_exception(&self) -> bool {
        matches!(self, Envelope::Exception(_))
    }

    pub fn as_actions(&self) -> Option<&[Action]> {
        match self {
            Envelope::Actions(actions) => Some(actions),
            _ => None,
        }
    }

    pub fn as_objects(&self) -> Option<&[Object]> {
        match self {
            Envelope::Objects(objects) => Some(objects),
            _ => None,
        }
    }

    /// Human-readable multi-line dump of the result, one row per line.
    pub fn render(&self) -> String {
        match self {
            Envelope::Actions(actions) => render_actions(actions),
            Envelope::Objects(objects) => render_objects(objects),
            Envelope::Exception(message) => format!("prolog exception '{}'\n", message),
            Envelope::Scalar(scalar) => format!("{}\n", scalar),
        }
    }

    /// Single bracketed textual form of an action list, rows concatenated:
    /// `[[a1 a2 ...][b1 b2 ...]]`. Defined only for the Actions variant;
    /// any other variant logs a warning and yields None.
    pub fn flatten(&self) -> Option<String> {
        match self {
            Envelope::Actions(actions) => Some(flatten_actions(actions)),
            _ => {
                tracing::warn!("flatten called on a non-action result");
                None
            }
        }
    }
}

fn render_actions(actions: &[Action]) -> String {
    let mut out = String::new();
    for action in actions {
        out.push('(');
        for (i, param) in action.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(param);
        }
        out.push_str(")\n");
    }
    out
}

fn render_objects(objects: &[Object]) -> String {
    let mut out = String::new();
    for object in objects {
        let fields = match object.name() {
            Some(name) => {
                out.push_str(name);
                out.push_str(": ");
                &object.fields[1..]
            }
            None => &object.fields[..],
        };
        out.push_str("{ ");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&field.name);
            out.push_str(": ");
            match &field.value {
                FieldValue::Text(text) => {
                    out.push('\'');
                    out.push_str(text);
                    out.push('\'');
                }
                FieldValue::Integer(value) => out.push_str(&value.to_string()),
                FieldValue::Float(value) => out.push_str(&value.to_string()),
            }
        }
        out.push_str(" }\n");
    }
    out
}

fn flatten_actions(actions: &[Action]) -> String {
    let mut out = String::from("[");
    for action in actions {
        out.push('[');
        for (i, param) in action.params.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(param);
        }
        out.push(']');
    }
    out.push(']');
    out
}
