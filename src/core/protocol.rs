//! Wire shapes of the remote "weights" push and the legacy "set_input" report.

use super::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WeightsPayload {
    #[serde(default)]
    pub dense_0: Option<Vec<f32>>,
    #[serde(default)]
    pub dense_1: Option<Vec<f32>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct TopologyPayload {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

/// One inbound push. Either part may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Push {
    pub weights: Option<WeightsPayload>,
    pub topology: Option<TopologyPayload>,
}

/// Outbound input report, serialized as `{ "input": [...] }`.
#[derive(Debug, Serialize)]
pub struct SetInput<'a> {
    pub input: &'a [f32],
}

/// Decode a push. Only unparsable JSON is an error; a malformed `weights` or
/// `topology` part is logged and dropped without affecting the other part.
pub fn parse_push(json: &str) -> Result<Push> {
    let value: Value = serde_json::from_str(json)?;
    Ok(push_from_value(&value))
}

pub fn push_from_value(value: &Value) -> Push {
    Push {
        weights: decode_part(value, "weights"),
        topology: decode_part(value, "topology"),
    }
}

fn decode_part<T: for<'de> Deserialize<'de>>(value: &Value, key: &str) -> Option<T> {
    let part = value.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(part) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("[push] ignoring malformed `{}`: {}", key, e);
            None
        }
    }
}

pub fn encode_set_input(input: &[f32]) -> Result<String> {
    Ok(serde_json::to_string(&SetInput { input })?)
}
