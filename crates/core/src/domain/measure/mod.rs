// Measure Parameters Record
//
// Length or area of a caller-supplied geometry, computed server-side.


use super::geometry::{Geometry, Point2D};
use super::record::{overlay, ParameterRecord};
use super::unit::{DistanceMode, Unit};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request parameters for distance/area measurement
#[derive(Debug, Clone)]
pub struct MeasureParameters {
    /// Geometry to measure (line for distance, polygon for area)
    pub geometry: Option<Arc<dyn Geometry>>,
    /// Result unit, `METER` unless overridden
    pub unit: Option<Unit>,
    /// Projection used for the measurement
    pub prj_coord_sys: Option<String>,
    /// Unset means the server default (`Geodesic`)
    pub distance_mode: Option<DistanceMode>,
}

/// Caller options overlaid onto [`MeasureParameters`] defaults
#[derive(Debug, Clone, Default)]
pub struct MeasureOptions {
    pub unit: Option<Unit>,
    pub prj_coord_sys: Option<String>,
    pub distance_mode: Option<DistanceMode>,
}

impl MeasureParameters {
    /// Create measure parameters
    ///
    /// Fails with [`CoreError::MissingRequired`] when no geometry is given.
    pub fn new(geometry: Option<Arc<dyn Geometry>>, options: MeasureOptions) -> Result<Self> {
        let geometry = geometry.ok_or(CoreError::MissingRequired("geometry"))?;

        let mut params = Self {
            geometry: Some(geometry),
            unit: Some(Unit::Meter),
            prj_coord_sys: None,
            distance_mode: None,
        };
        params.apply(options);
        Ok(params)
    }

    /// Infallible constructor for callers that already hold a geometry
    pub fn with_geometry(geometry: impl Geometry + 'static, options: MeasureOptions) -> Self {
        let mut params = Self {
            geometry: Some(Arc::new(geometry)),
            unit: Some(Unit::Meter),
            prj_coord_sys: None,
            distance_mode: None,
        };
        params.apply(options);
        params
    }

    /// Overlay options field by field (last write wins)
    pub fn apply(&mut self, options: MeasureOptions) {
        overlay(&mut self.unit, options.unit);
        overlay(&mut self.prj_coord_sys, options.prj_coord_sys);
        overlay(&mut self.distance_mode, options.distance_mode);
    }

    /// Vertices of the geometry, checked for emptiness
    pub fn point2ds(&self) -> Result<Vec<Point2D>> {
        let geometry = self
            .geometry
            .as_ref()
            .ok_or(CoreError::MissingRequired("geometry"))?;

        let points = geometry.points();
        if points.is_empty() {
            return Err(CoreError::Validation(
                "geometry has no coordinates".to_string(),
            ));
        }
        Ok(points)
    }

    /// Query-string pairs for the `distance.json` / `area.json` resources
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let points = self.point2ds()?;

        let mut query = vec![("point2Ds".to_string(), serde_json::to_string(&points)?)];
        if let Some(unit) = self.unit {
            query.push(("unit".to_string(), unit.to_string()));
        }
        if let Some(prj) = self.prj_coord_sys.as_deref().filter(|s| !s.is_empty()) {
            query.push(("prjCoordSys".to_string(), prj.to_string()));
        }
        if let Some(mode) = self.distance_mode {
            query.push(("distanceMode".to_string(), mode.to_string()));
        }
        Ok(query)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MeasureJson<'a> {
    #[serde(rename = "point2Ds", skip_serializing_if = "Option::is_none")]
    point2ds: Option<Vec<Point2D>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prj_coord_sys: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_mode: Option<DistanceMode>,
}

impl ParameterRecord for MeasureParameters {
    const CLASS_NAME: &'static str = "SuperMap.MeasureParameters";

    fn to_json(&self) -> Result<String> {
        let body = MeasureJson {
            point2ds: self.geometry.as_ref().map(|g| g.points()),
            unit: self.unit,
            prj_coord_sys: self.prj_coord_sys.as_deref().filter(|s| !s.is_empty()),
            distance_mode: self.distance_mode,
        };
        Ok(serde_json::to_string(&body)?)
    }

    fn release(&mut self) {
        self.geometry = None;
        self.unit = None;
        self.prj_coord_sys = None;
        self.distance_mode = None;
    }
}

/// Result of a `distance.json` / `area.json` request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MeasureResult {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub area: f64,
    pub unit: Option<Unit>,
}
