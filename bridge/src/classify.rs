//! Structural classification of result lists.

use crate::engine::Engine;
use crate::{BridgeError, BridgeResult};

/// The two shapes a list-valued result can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    Actions,
    Objects,
}

/// Decide whether a result list holds action rows or object rows.
///
/// Action lists look like
/// `[[action1, arg1, arg2, ...], [action2, arg1, ...], ...]`
/// while object lists look like
/// `[[name1, [field1, value1], [field2, value2]], ...]`,
/// so the list is an object list exactly when the second element of the
/// first row is itself a list. There is no explicit tag; this is a
/// heuristic over term shape. An action row always carries at least a
/// verb and one argument, so a row of length 1 reads as an object row
/// holding nothing but a name.
pub fn classify<E: Engine>(engine: &E, list: E::Term) -> BridgeResult<ListShape> {
    let (first_row, _) = engine
        .list_pair(list)
        .ok_or_else(|| BridgeError::MalformedResult("result list is empty".to_string()))?;

    let (_, row_tail) = engine
        .list_pair(first_row)
        .ok_or_else(|| BridgeError::MalformedResult("first result row is not a list".to_string()))?;

    match engine.list_pair(row_tail) {
        None => Ok(ListShape::Objects),
        Some((second, _)) => {
            if engine.is_list(second) {
                Ok(ListShape::Objects)
            } else {
                Ok(ListShape::Actions)
            }
        }
    }
}
