// Geometry capability
//
// Measurement only needs the vertex list of whatever geometry the caller
// holds, so geometry is a narrow trait rather than a closed set of shapes.
// Third-party geometry types plug in by implementing `Geometry`.

use crate::error::{CoreError, Result};
use geojson::{GeoJson, Position, Value as GeometryValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Shape family of a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

/// Anything that can hand out its vertices in server coordinates
pub trait Geometry: Debug + Send + Sync {
    fn kind(&self) -> GeometryKind;

    /// Vertices in order. Polygons return their outer ring.
    fn points(&self) -> Vec<Point2D>;
}

/// Server-side `Point2D` (`{"x":..,"y":..}`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Geometry for Point2D {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Point
    }

    fn points(&self) -> Vec<Point2D> {
        vec![*self]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    pub points: Vec<Point2D>,
}

impl LineString {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }
}

impl Geometry for LineString {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Line
    }

    fn points(&self) -> Vec<Point2D> {
        self.points.clone()
    }
}

/// Polygon given by its outer ring
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub ring: Vec<Point2D>,
}

impl Polygon {
    pub fn new(ring: Vec<Point2D>) -> Self {
        Self { ring }
    }
}

impl Geometry for Polygon {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Polygon
    }

    fn points(&self) -> Vec<Point2D> {
        self.ring.clone()
    }
}

/// GeoJSON `Point`, `LineString` or `Polygon`, bare or wrapped in a `Feature`
///
/// Every position is checked when the value is decoded, so a geometry that
/// constructs successfully always hands out its full vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonGeometry {
    kind: GeometryKind,
    points: Vec<Point2D>,
}

impl GeoJsonGeometry {
    pub fn new(value: Value) -> Result<Self> {
        let geometry = match GeoJson::from_json_value(value)
            .map_err(|e| CoreError::Validation(format!("invalid GeoJSON: {}", e)))?
        {
            GeoJson::Geometry(geometry) => geometry,
            GeoJson::Feature(feature) => feature
                .geometry
                .ok_or(CoreError::MissingRequired("geometry"))?,
            GeoJson::FeatureCollection(_) => {
                return Err(unsupported("FeatureCollection"));
            }
        };

        match geometry.value {
            GeometryValue::Point(position) => Ok(Self {
                kind: GeometryKind::Point,
                points: vec![point(&position)?],
            }),
            GeometryValue::LineString(line) => Ok(Self {
                kind: GeometryKind::Line,
                points: points(&line)?,
            }),
            GeometryValue::Polygon(rings) => Ok(Self {
                kind: GeometryKind::Polygon,
                points: rings.first().map(|ring| points(ring)).transpose()?.unwrap_or_default(),
            }),
            GeometryValue::MultiPoint(_) => Err(unsupported("MultiPoint")),
            GeometryValue::MultiLineString(_) => Err(unsupported("MultiLineString")),
            GeometryValue::MultiPolygon(_) => Err(unsupported("MultiPolygon")),
            GeometryValue::GeometryCollection(_) => Err(unsupported("GeometryCollection")),
        }
    }
}

fn unsupported(kind: &str) -> CoreError {
    CoreError::Validation(format!("unsupported GeoJSON geometry type: {}", kind))
}

fn point(position: &[f64]) -> Result<Point2D> {
    match position {
        [x, y, ..] => Ok(Point2D::new(*x, *y)),
        _ => Err(CoreError::Validation(format!(
            "GeoJSON position needs two coordinates, got {:?}",
            position
        ))),
    }
}

fn points(positions: &[Position]) -> Result<Vec<Point2D>> {
    positions.iter().map(|p| point(p)).collect()
}

impl Geometry for GeoJsonGeometry {
    fn kind(&self) -> GeometryKind {
        self.kind
    }

    fn points(&self) -> Vec<Point2D> {
        self.points.clone()
    }
}
