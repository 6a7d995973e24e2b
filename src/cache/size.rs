//! Entry size estimation.

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

/// Estimates the size of a value in bytes.
///
/// Text values count the byte length of the text itself. Anything else
/// counts the length of its compact JSON form. Values that cannot be
/// serialized fall back to the length of their `Debug` rendering, so an
/// estimate is always produced.
pub fn estimate_size<V>(value: &V) -> usize
where
    V: Serialize + Debug + ?Sized,
{
    match serde_json::to_value(value) {
        Ok(Value::String(text)) => text.len(),
        Ok(other) => other.to_string().len(),
        Err(_) => format!("{:?}", value).len(),
    }
}
