//! iServer Client Implementation

use crate::config::ClientConfig;
use crate::error::Result;
use crate::measure::MeasureService;
use crate::transport::ReqwestTransport;
use iserver_core::application::{
    JobsService, ProcessingServiceBase, ServiceOptions, SummaryAttributesJobsService,
};
use iserver_core::domain::JobParameter;
use iserver_core::port::{RestTransport, SystemTimeProvider, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Distributed analysis jobs root, relative to the services root
pub const DISTRIBUTED_ANALYST_PATH: &str = "distributedanalyst/rest/v1/jobs";

/// iServer Client
///
/// Owns one HTTP transport and hands out service handles that share it.
///
/// # Example
///
/// ```no_run
/// use iserver_sdk::{ClientConfig, IServerClient};
/// use iserver_sdk::domain::{SummaryAttributesJobsOptions, SummaryAttributesJobsParameter};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IServerClient::new(ClientConfig::default())?;
/// let jobs = client.summary_attributes_jobs(Default::default());
///
/// let params = SummaryAttributesJobsParameter::new(SummaryAttributesJobsOptions {
///     dataset_name: Some("samples_processing_newyorkZone_R".to_string()),
///     ..Default::default()
/// });
/// let job = jobs.submit_job(&params, Duration::from_secs(1)).await?;
/// println!("Job {} finished", job.id);
/// # Ok(())
/// # }
/// ```
pub struct IServerClient {
    config: ClientConfig,
    transport: Arc<dyn RestTransport>,
    time_provider: Arc<dyn TimeProvider>,
}

impl IServerClient {
    /// Create a client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        info!(url = %config.url, token = config.token.is_some(), "iServer client created");
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from `ISERVER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client over any transport (tests, custom HTTP stacks)
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn RestTransport>) -> Self {
        Self {
            config,
            transport,
            time_provider: Arc::new(SystemTimeProvider),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Distributed analysis jobs root
    pub fn processing_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.url.trim_end_matches('/'),
            DISTRIBUTED_ANALYST_PATH
        )
    }

    /// Fresh processing base, so releasing one service leaves the others running
    pub fn processing_base(&self) -> Arc<ProcessingServiceBase> {
        Arc::new(ProcessingServiceBase::new(
            self.transport.clone(),
            self.time_provider.clone(),
            self.config.poll_config(),
        ))
    }

    /// Job service of any type under the distributed analysis root
    pub fn jobs_service<P: JobParameter>(&self, options: ServiceOptions) -> JobsService<P> {
        JobsService::new(self.processing_url(), self.processing_base(), options)
    }

    pub fn summary_attributes_jobs(&self, options: ServiceOptions) -> SummaryAttributesJobsService {
        self.jobs_service(options)
    }

    /// Measure service for a map resource
    ///
    /// `map_url` is absolute, or relative to the services root
    /// (e.g. `map-world/rest/maps/World`).
    pub fn measure(&self, map_url: &str) -> MeasureService {
        let url = if map_url.starts_with("http://") || map_url.starts_with("https://") {
            map_url.to_string()
        } else {
            format!(
                "{}/{}",
                self.config.url.trim_end_matches('/'),
                map_url.trim_start_matches('/')
            )
        };
        MeasureService::new(url, self.transport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> IServerClient {
        IServerClient::new(ClientConfig {
            url: "http://host:8090/iserver/services/".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_summary_attributes_url() {
        let jobs = client().summary_attributes_jobs(ServiceOptions::default());
        assert_eq!(
            jobs.url(),
            Some("http://host:8090/iserver/services/distributedanalyst/rest/v1/jobs/spatialanalyst/summaryattributes")
        );
    }

    #[test]
    fn test_measure_url_relative_and_absolute() {
        let client = client();
        assert_eq!(
            client.measure("/map-world/rest/maps/World").url(),
            "http://host:8090/iserver/services/map-world/rest/maps/World"
        );
        assert_eq!(
            client.measure("https://other/maps/World").url(),
            "https://other/maps/World"
        );
    }

    #[test]
    fn test_released_service_leaves_siblings_active() {
        let client = client();
        let mut first = client.summary_attributes_jobs(ServiceOptions::default());
        let second = client.summary_attributes_jobs(ServiceOptions::default());

        first.release();

        assert!(first.url().is_none());
        assert!(second.url().is_some());
    }
}
