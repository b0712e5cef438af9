//! iServer SDK - Rust Client Library
//!
//! HTTP client for the iServer REST API: layer display parameters,
//! distance/area measurement and distributed analysis jobs.
//!
//! # Example
//!
//! ```no_run
//! use iserver_sdk::domain::{LineString, MeasureOptions, MeasureParameters, Point2D};
//! use iserver_sdk::IServerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads ISERVER_URL / ISERVER_TOKEN
//!     let client = IServerClient::from_env()?;
//!
//!     let params = MeasureParameters::with_geometry(
//!         LineString::new(vec![Point2D::new(116.3, 39.9), Point2D::new(121.4, 31.2)]),
//!         MeasureOptions::default(),
//!     );
//!     let result = client
//!         .measure("map-world/rest/maps/World")
//!         .measure_distance(&params)
//!         .await?;
//!
//!     println!("Distance: {} {:?}", result.distance, result.unit);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod measure;
mod transport;

pub use client::{IServerClient, DISTRIBUTED_ANALYST_PATH};
pub use config::{ClientConfig, DEFAULT_URL};
pub use error::{Result, SdkError};
pub use measure::{MeasureMode, MeasureService};
pub use transport::ReqwestTransport;

pub use iserver_core::application::{
    JobsService, ServiceOptions, SummaryAttributesJobsService,
};
pub use iserver_core::domain;
pub use iserver_core::port::RequestOptions;
pub use iserver_core::CoreError;
