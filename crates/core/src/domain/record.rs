// Parameter Record contract shared by request/response records

use crate::error::Result;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Typed request/response record of the iServer REST API.
///
/// Records hold `Option` fields that stay unset until a default or a caller
/// option fills them. They serialize to the JSON text the server expects and
/// can be cleared in place with [`ParameterRecord::release`].
pub trait ParameterRecord {
    /// Class name used by the server-side object model
    const CLASS_NAME: &'static str;

    /// Serialize to the JSON text sent to the server
    fn to_json(&self) -> Result<String>;

    /// Clear every field the record declares
    ///
    /// Nested records are dropped, not released individually.
    fn release(&mut self);
}

/// Parameter record accepted by a processing job service
///
/// The implementing type pins the service path, so a job service and the
/// records it submits cannot be mixed up.
pub trait JobParameter: Send + Sync {
    /// Path appended to the server URL, e.g. `spatialanalyst/summaryattributes`
    const SERVICE_PATH: &'static str;

    /// JSON body of the job-creation POST
    fn to_request_body(&self) -> Result<Value>;
}

/// Overlay a caller option onto a field; `None` keeps the current value.
pub(crate) fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Numeric value written without a fractional part when it is integral
/// (`0`, not `0.0`), matching what the server's own JSON writer emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonNumber(pub f64);

// 2^53: largest range where f64 -> i64 is exact
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < MAX_SAFE_INTEGER {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

pub(crate) fn serialize_number_seq<S: Serializer>(
    values: &[f64],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().copied().map(JsonNumber))
}
