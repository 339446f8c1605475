//! Decoding of engine-raised exception terms into diagnostic strings.

use crate::engine::{Engine, TermKind};

const UNKNOWN_EXCEPTION: &str = "unknown prolog exception";

/// Render a raised term as a human-readable diagnostic.
///
/// Built-in predicates raise `error(Formal, Context)`: `Formal` is the
/// formal description of the error, `Context` is debugging help of the
/// generic form `context(Name/Arity, Message)`, any part of which may be
/// unbound. Only the two-argument `error/2` shape with a compound `Formal`
/// is recognized; everything else degrades to a fallback string. Diagnostic
/// rendering is best-effort and never fails.
pub fn decode_exception<E: Engine>(engine: &E, raised: E::Term) -> String {
    match engine.functor(raised) {
        Some((name, 2)) if name == "error" => render_formal(engine, raised),
        _ => UNKNOWN_EXCEPTION.to_string(),
    }
}

/// Render the formal part, eg `type_error(integer, foo)` becomes
/// `"type_error: integer, foo"`.
fn render_formal<E: Engine>(engine: &E, error: E::Term) -> String {
    let formal = match engine.arg(error, 1) {
        Some(formal) => formal,
        None => return UNKNOWN_EXCEPTION.to_string(),
    };

    if engine.kind(formal) != TermKind::Compound {
        return UNKNOWN_EXCEPTION.to_string();
    }
    let (kind, arity) = match engine.functor(formal) {
        Some(functor) => functor,
        None => return UNKNOWN_EXCEPTION.to_string(),
    };

    let mut rendered = kind;

    if arity != 2 {
        rendered.push_str(" (unknown details)");
        return rendered;
    }

    match engine.arg(formal, 1).and_then(|what| engine.written_form(what)) {
        Some(what) => {
            rendered.push_str(": ");
            rendered.push_str(&what);
        }
        None => {
            rendered.push_str(" (details in unknown format)");
            return rendered;
        }
    }

    let detail = match engine.arg(formal, 2) {
        Some(detail) => detail,
        None => return rendered,
    };
    match engine.kind(detail) {
        TermKind::Variable => rendered.push_str(" (details in unknown format)"),
        TermKind::Compound => match engine.written_form(detail) {
            Some(text) => {
                rendered.push_str(", ");
                rendered.push_str(&text);
            }
            None => rendered.push_str(" (details in unknown format)"),
        },
        _ => match engine.text_value(detail) {
            Some(text) => {
                rendered.push_str(", ");
                rendered.push_str(&text);
            }
            None => rendered.push_str(" (details in unknown format)"),
        },
    }

    rendered
}
