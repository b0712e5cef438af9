// Measurement units and distance modes

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Length/angle units understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Meter,
    Kilometer,
    Mile,
    Yard,
    Degree,
    Millimeter,
    Centimeter,
    Inch,
    Decimeter,
    Foot,
    Second,
    Minute,
    Radian,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Meter => "METER",
            Unit::Kilometer => "KILOMETER",
            Unit::Mile => "MILE",
            Unit::Yard => "YARD",
            Unit::Degree => "DEGREE",
            Unit::Millimeter => "MILLIMETER",
            Unit::Centimeter => "CENTIMETER",
            Unit::Inch => "INCH",
            Unit::Decimeter => "DECIMETER",
            Unit::Foot => "FOOT",
            Unit::Second => "SECOND",
            Unit::Minute => "MINUTE",
            Unit::Radian => "RADIAN",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "METER" => Ok(Unit::Meter),
            "KILOMETER" => Ok(Unit::Kilometer),
            "MILE" => Ok(Unit::Mile),
            "YARD" => Ok(Unit::Yard),
            "DEGREE" => Ok(Unit::Degree),
            "MILLIMETER" => Ok(Unit::Millimeter),
            "CENTIMETER" => Ok(Unit::Centimeter),
            "INCH" => Ok(Unit::Inch),
            "DECIMETER" => Ok(Unit::Decimeter),
            "FOOT" => Ok(Unit::Foot),
            "SECOND" => Ok(Unit::Second),
            "MINUTE" => Ok(Unit::Minute),
            "RADIAN" => Ok(Unit::Radian),
            other => Err(format!("unknown unit: {}", other)),
        }
    }
}

/// Whether lengths are measured on the ellipsoid or on the projected plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMode {
    Geodesic,
    Planar,
}

impl std::fmt::Display for DistanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceMode::Geodesic => write!(f, "Geodesic"),
            DistanceMode::Planar => write!(f, "Planar"),
        }
    }
}

impl FromStr for DistanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "geodesic" => Ok(DistanceMode::Geodesic),
            "planar" => Ok(DistanceMode::Planar),
            other => Err(format!("unknown distance mode: {}", other)),
        }
    }
}
