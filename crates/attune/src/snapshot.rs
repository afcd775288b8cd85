//! Snapshot normalization for serialization
//!
//! Domain hits are float accumulators, so repeated decay leaves binary
//! floating-point noise (`12.500000000000002`). Snapshots round every float
//! to 10 decimal places on the way out. Only the serialized copy is
//! rounded; live state keeps full precision.

use serde_json::Value;

use crate::error::{AttuneError, Result};
use crate::learner::LearnerState;

/// A full-value snapshot of state with output floats normalized.
pub fn cleaned(state: &LearnerState) -> Result<Value> {
    let mut value = serde_json::to_value(state)
        .map_err(|e| AttuneError::Serialization(format!("failed to encode state: {e}")))?;
    round_floats(&mut value);
    Ok(value)
}

/// Serialize a cleaned snapshot to pretty JSON.
pub fn to_json(state: &LearnerState) -> Result<String> {
    let value = cleaned(state)?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| AttuneError::Serialization(format!("failed to encode snapshot: {e}")))
}

fn round_floats(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for entry in map.values_mut() {
                round_floats(entry);
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                round_floats(entry);
            }
        }
        Value::Number(number) if number.is_f64() => {
            if let Some(raw) = number.as_f64() {
                let rounded = (raw * 1e10).round() / 1e10;
                if let Some(clean) = serde_json::Number::from_f64(rounded) {
                    *value = Value::Number(clean);
                }
            }
        }
        _ => {}
    }
}
