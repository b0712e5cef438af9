// Processing Service Port (Interface)
//
// Capability set shared by every distributed-analysis job service: list,
// fetch and submit jobs at a service URL.

use crate::domain::JobInfo;
use crate::error::Result;
use crate::port::RequestOptions;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

#[async_trait]
pub trait ProcessingService: Send + Sync {
    /// List every job under a service URL
    async fn get_jobs(&self, url: &str, options: &RequestOptions) -> Result<Vec<JobInfo>>;

    /// Fetch a single job resource
    async fn get_job(&self, url: &str, options: &RequestOptions) -> Result<JobInfo>;

    /// Submit a job and poll it until it completes or fails
    ///
    /// A zero `poll_interval` falls back to the implementation default.
    async fn add_job(
        &self,
        url: &str,
        body: Value,
        poll_interval: Duration,
        options: &RequestOptions,
    ) -> Result<JobInfo>;

    /// Stop in-flight polling; later calls fail with `CoreError::Released`
    fn release(&self);
}
