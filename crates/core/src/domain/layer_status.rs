// Layer Status Record (map theming)

use super::record::{overlay, serialize_number_seq, JsonNumber, ParameterRecord};
use crate::error::Result;
use serde::{Deserialize, Serialize, Serializer};

/// How a [`FieldValuesDisplayFilter`] treats the listed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldValuesDisplayMode {
    /// Only features carrying one of the values are shown
    Display,
    /// Features carrying one of the values are hidden
    Disable,
}

/// Show/hide filter on a numeric layer field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValuesDisplayFilter {
    #[serde(serialize_with = "serialize_number_seq")]
    pub values: Vec<f64>,
    pub field_name: Option<String>,
    pub field_values_display_mode: Option<FieldValuesDisplayMode>,
}

impl FieldValuesDisplayFilter {
    pub fn new(
        field_name: impl Into<String>,
        values: Vec<f64>,
        mode: FieldValuesDisplayMode,
    ) -> Self {
        Self {
            values,
            field_name: Some(field_name.into()),
            field_values_display_mode: Some(mode),
        }
    }
}

/// Display state of one sub-layer
///
/// Every field is unset by default. The layer name and visibility are the
/// ones a request needs; the rest narrow what is drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerStatus {
    pub layer_name: Option<String>,
    pub is_visible: Option<bool>,
    /// SQL filter, e.g. `"smid < 10"`
    pub display_filter: Option<String>,
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub field_values_display_filter: Option<FieldValuesDisplayFilter>,
}

/// Caller options overlaid onto [`LayerStatus`] defaults
#[derive(Debug, Clone, Default)]
pub struct LayerStatusOptions {
    pub layer_name: Option<String>,
    pub is_visible: Option<bool>,
    pub display_filter: Option<String>,
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub field_values_display_filter: Option<FieldValuesDisplayFilter>,
}

impl LayerStatus {
    /// Create a layer status from caller options
    ///
    /// # Example
    ///
    /// ```
    /// use iserver_core::domain::{LayerStatus, LayerStatusOptions, ParameterRecord};
    ///
    /// let status = LayerStatus::new(LayerStatusOptions {
    ///     layer_name: Some("roads".to_string()),
    ///     is_visible: Some(true),
    ///     ..Default::default()
    /// });
    /// assert_eq!(status.to_json().unwrap(), r#"{"type":"UGC","name":"roads","visible":true}"#);
    /// ```
    pub fn new(options: LayerStatusOptions) -> Self {
        let mut status = Self::default();
        status.apply(options);
        status
    }

    /// Overlay options field by field (last write wins)
    pub fn apply(&mut self, options: LayerStatusOptions) {
        overlay(&mut self.layer_name, options.layer_name);
        overlay(&mut self.is_visible, options.is_visible);
        overlay(&mut self.display_filter, options.display_filter);
        overlay(&mut self.min_scale, options.min_scale);
        overlay(&mut self.max_scale, options.max_scale);
        overlay(
            &mut self.field_values_display_filter,
            options.field_values_display_filter,
        );
    }
}

/// Wire shape. Each `None` is a key left out of the output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerStatusJson<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<Option<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_scale: Option<JsonNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_scale: Option<JsonNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_values_display_filter: Option<&'a FieldValuesDisplayFilter>,
}

// Inclusion predicates.
// Strings: dropped when unset or empty.
// Scales: kept at exactly 0, dropped when unset or NaN.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn scale(value: Option<f64>) -> Option<JsonNumber> {
    value.filter(|v| !v.is_nan()).map(JsonNumber)
}

impl<'a> From<&'a LayerStatus> for LayerStatusJson<'a> {
    fn from(status: &'a LayerStatus) -> Self {
        let name = non_empty(&status.layer_name);
        Self {
            kind: "UGC",
            name,
            // visibility travels with the name, null when unset
            visible: name.map(|_| status.is_visible),
            display_filter: non_empty(&status.display_filter),
            min_scale: scale(status.min_scale),
            max_scale: scale(status.max_scale),
            field_values_display_filter: status.field_values_display_filter.as_ref(),
        }
    }
}

impl Serialize for LayerStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        LayerStatusJson::from(self).serialize(serializer)
    }
}

impl ParameterRecord for LayerStatus {
    const CLASS_NAME: &'static str = "SuperMap.LayerStatus";

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn release(&mut self) {
        self.layer_name = None;
        self.is_visible = None;
        self.display_filter = None;
        self.min_scale = None;
        self.max_scale = None;
        self.field_values_display_filter = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roads(visible: bool) -> LayerStatusOptions {
        LayerStatusOptions {
            layer_name: Some("roads".to_string()),
            is_visible: Some(visible),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_and_visibility_only() {
        let status = LayerStatus::new(roads(true));
        assert_eq!(
            status.to_json().unwrap(),
            r#"{"type":"UGC","name":"roads","visible":true}"#
        );
    }

    #[test]
    fn test_zero_min_scale_is_kept() {
        let status = LayerStatus::new(LayerStatusOptions {
            min_scale: Some(0.0),
            ..roads(false)
        });
        assert_eq!(
            status.to_json().unwrap(),
            r#"{"type":"UGC","name":"roads","visible":false,"minScale":0}"#
        );
    }

    #[test]
    fn test_zero_max_scale_is_kept() {
        let status = LayerStatus::new(LayerStatusOptions {
            max_scale: Some(0.0),
            ..roads(true)
        });
        assert_eq!(
            status.to_json().unwrap(),
            r#"{"type":"UGC","name":"roads","visible":true,"maxScale":0}"#
        );
    }

    #[test]
    fn test_nan_scale_is_dropped() {
        let status = LayerStatus::new(LayerStatusOptions {
            max_scale: Some(f64::NAN),
            ..roads(true)
        });
        assert!(!status.to_json().unwrap().contains("maxScale"));
    }

    #[test]
    fn test_empty_name_drops_visibility() {
        let status = LayerStatus::new(LayerStatusOptions {
            layer_name: Some(String::new()),
            is_visible: Some(true),
            ..Default::default()
        });
        assert_eq!(status.to_json().unwrap(), r#"{"type":"UGC"}"#);
    }

    #[test]
    fn test_unset_visibility_is_null() {
        let status = LayerStatus::new(LayerStatusOptions {
            layer_name: Some("roads".to_string()),
            ..Default::default()
        });
        assert_eq!(
            status.to_json().unwrap(),
            r#"{"type":"UGC","name":"roads","visible":null}"#
        );
    }

    #[test]
    fn test_empty_display_filter_is_dropped() {
        let status = LayerStatus::new(LayerStatusOptions {
            display_filter: Some(String::new()),
            ..roads(true)
        });
        assert!(!status.to_json().unwrap().contains("displayFilter"));
    }

    #[test]
    fn test_full_record_key_order() {
        let status = LayerStatus::new(LayerStatusOptions {
            display_filter: Some("smid < 10".to_string()),
            min_scale: Some(0.0),
            max_scale: Some(1.5e-4),
            field_values_display_filter: Some(FieldValuesDisplayFilter::new(
                "SmID",
                vec![1.0, 2.0, 3.0],
                FieldValuesDisplayMode::Disable,
            )),
            ..roads(true)
        });

        let json = status.to_json().unwrap();
        assert!(json.starts_with(
            r#"{"type":"UGC","name":"roads","visible":true,"displayFilter":"smid < 10","minScale":0,"maxScale":"#
        ));
        assert!(json.ends_with(
            r#""fieldValuesDisplayFilter":{"values":[1,2,3],"fieldName":"SmID","fieldValuesDisplayMode":"DISABLE"}}"#
        ));
    }

    #[test]
    fn test_display_filter_is_escaped() {
        let status = LayerStatus::new(LayerStatusOptions {
            display_filter: Some(r#"NAME = "Main St""#.to_string()),
            ..roads(true)
        });

        let parsed: serde_json::Value = serde_json::from_str(&status.to_json().unwrap()).unwrap();
        assert_eq!(parsed["displayFilter"], r#"NAME = "Main St""#);
    }

    #[test]
    fn test_options_override_defaults() {
        let mut status = LayerStatus::new(roads(true));
        status.apply(LayerStatusOptions {
            is_visible: Some(false),
            ..Default::default()
        });

        assert_eq!(status.layer_name.as_deref(), Some("roads"));
        assert_eq!(status.is_visible, Some(false));
        assert_eq!(status.display_filter, None);
    }

    #[test]
    fn test_release_clears_every_field() {
        let mut status = LayerStatus::new(LayerStatusOptions {
            display_filter: Some("smid < 10".to_string()),
            min_scale: Some(1.0),
            max_scale: Some(2.0),
            field_values_display_filter: Some(FieldValuesDisplayFilter::new(
                "SmID",
                vec![1.0],
                FieldValuesDisplayMode::Display,
            )),
            ..roads(true)
        });

        status.release();

        assert_eq!(status, LayerStatus::default());
        assert_eq!(status.to_json().unwrap(), r#"{"type":"UGC"}"#);

        // second release is a no-op
        status.release();
        assert_eq!(status, LayerStatus::default());
    }
}
