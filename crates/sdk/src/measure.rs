//! Measure Service
//!
//! Distance and area measurement against a map resource
//! (`.../maps/{map}/distance.json`, `.../maps/{map}/area.json`).

use crate::error::Result;
use iserver_core::domain::{MeasureParameters, MeasureResult};
use iserver_core::port::{RequestOptions, RestTransport};
use std::sync::Arc;
use tracing::debug;

/// Kind of measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    Distance,
    Area,
}

impl MeasureMode {
    fn resource(&self) -> &'static str {
        match self {
            MeasureMode::Distance => "distance.json",
            MeasureMode::Area => "area.json",
        }
    }
}

pub struct MeasureService {
    url: String,
    transport: Arc<dyn RestTransport>,
    options: RequestOptions,
}

impl MeasureService {
    /// # Arguments
    ///
    /// * `map_url` - map resource, e.g. `http://host:8090/iserver/services/map-world/rest/maps/World`
    pub fn new(map_url: impl AsRef<str>, transport: Arc<dyn RestTransport>) -> Self {
        Self {
            url: map_url.as_ref().trim_end_matches('/').to_string(),
            transport,
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn measure_distance(&self, params: &MeasureParameters) -> Result<MeasureResult> {
        self.measure(MeasureMode::Distance, params).await
    }

    pub async fn measure_area(&self, params: &MeasureParameters) -> Result<MeasureResult> {
        self.measure(MeasureMode::Area, params).await
    }

    pub async fn measure(
        &self,
        mode: MeasureMode,
        params: &MeasureParameters,
    ) -> Result<MeasureResult> {
        // rejects empty geometry before any request
        let query = params.to_query()?;
        let url = format!("{}/{}", self.url, mode.resource());

        debug!(url = %url, mode = ?mode, "Measuring");
        let value = self.transport.get_json(&url, &query, &self.options).await?;
        Ok(serde_json::from_value(value)?)
    }
}
