// Job Services
//
// Thin handles bound to one analysis type. They derive the working URL from
// the server URL and delegate every call to a ProcessingService.

#[cfg(test)]
mod jobs_test;

use crate::domain::{JobInfo, JobParameter, SummaryAttributesJobsParameter};
use crate::error::{CoreError, Result};
use crate::port::{ProcessingService, RequestOptions};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Summary attributes (group-by statistics) job service
pub type SummaryAttributesJobsService = JobsService<SummaryAttributesJobsParameter>;

/// Caller options overlaid onto a job service's request options
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub headers: Option<BTreeMap<String, String>>,
    pub timeout: Option<Duration>,
}

/// Job service for parameter records of type `P`
pub struct JobsService<P: JobParameter> {
    /// `None` once released
    url: Option<String>,
    options: RequestOptions,
    base: Arc<dyn ProcessingService>,
    _params: PhantomData<fn(&P)>,
}

impl<P: JobParameter> JobsService<P> {
    /// Create a job service under `url`
    ///
    /// The working URL is `url` followed by `P::SERVICE_PATH`.
    ///
    /// # Arguments
    ///
    /// * `url` - processing service root, e.g. `http://host:8090/iserver/services/distributedanalyst/rest/v1/jobs`
    /// * `base` - shared job submission/polling capability
    /// * `options` - request options for every call made by this handle
    pub fn new(
        url: impl AsRef<str>,
        base: Arc<dyn ProcessingService>,
        options: ServiceOptions,
    ) -> Self {
        let url = format!("{}/{}", url.as_ref().trim_end_matches('/'), P::SERVICE_PATH);

        let mut service = Self {
            url: Some(url),
            options: RequestOptions::default(),
            base,
            _params: PhantomData,
        };
        service.apply(options);
        service
    }

    /// Overlay options field by field (last write wins)
    pub fn apply(&mut self, options: ServiceOptions) {
        if let Some(headers) = options.headers {
            self.options.headers = headers;
        }
        if let Some(timeout) = options.timeout {
            self.options.timeout = Some(timeout);
        }
    }

    /// Working URL, `None` after release
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    fn working_url(&self) -> Result<&str> {
        self.url.as_deref().ok_or(CoreError::Released)
    }

    /// List every job of this analysis type
    pub async fn list_jobs(&self) -> Result<Vec<JobInfo>> {
        let url = self.working_url()?;
        debug!(url = %url, "Listing jobs");
        self.base.get_jobs(url, &self.options).await
    }

    /// Fetch one job by ID
    pub async fn get_job(&self, id: &str) -> Result<JobInfo> {
        let url = format!("{}/{}", self.working_url()?, id);
        debug!(url = %url, "Fetching job");
        self.base.get_job(&url, &self.options).await
    }

    /// Submit a job and wait for it to complete
    ///
    /// # Arguments
    ///
    /// * `params` - analysis parameters
    /// * `poll_interval` - delay between status polls (zero = base default)
    pub async fn submit_job(&self, params: &P, poll_interval: Duration) -> Result<JobInfo> {
        let url = self.working_url()?;
        let body = params.to_request_body()?;
        debug!(url = %url, "Submitting job");
        self.base
            .add_job(url, body, poll_interval, &self.options)
            .await
    }

    /// Clear the handle and release the shared base
    pub fn release(&mut self) {
        self.url = None;
        self.options = RequestOptions::default();
        self.base.release();
    }
}
