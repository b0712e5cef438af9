// Processing Service Base
//
// Submits distributed-analysis jobs and polls them to completion over a
// RestTransport. Every job service delegates here.


use crate::application::release::{release_channel, ReleaseSender, ReleaseToken};
use crate::domain::{AddJobResponse, JobInfo};
use crate::error::{CoreError, Result};
use crate::port::{ProcessingService, RequestOptions, RestTransport, TimeProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Poll interval used when the caller passes zero
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Polling configuration
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub default_interval: Duration,
    /// Give up after this many polls (None or 0 = poll until a terminal state)
    pub max_polls: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            default_interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
        }
    }
}

pub struct ProcessingServiceBase {
    transport: Arc<dyn RestTransport>,
    time_provider: Arc<dyn TimeProvider>,
    config: PollConfig,
    release_tx: ReleaseSender,
    release_token: ReleaseToken,
}

impl ProcessingServiceBase {
    pub fn new(
        transport: Arc<dyn RestTransport>,
        time_provider: Arc<dyn TimeProvider>,
        config: PollConfig,
    ) -> Self {
        let (release_tx, release_token) = release_channel();
        Self {
            transport,
            time_provider,
            config,
            release_tx,
            release_token,
        }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.release_token.is_released() {
            return Err(CoreError::Released);
        }
        Ok(())
    }

    /// Poll a job resource until it finishes, fails or polling is cut short
    async fn poll(
        &self,
        location: &str,
        interval: Duration,
        options: &RequestOptions,
    ) -> Result<JobInfo> {
        let mut token = self.release_token.clone();
        let mut polls: u32 = 0;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = token.wait() => {
                    info!(location = %location, polls, "Polling stopped by release");
                    return Err(CoreError::Released);
                }
            }

            polls += 1;
            // cache-busting timestamp
            let query = vec![("_t".to_string(), self.time_provider.now_millis().to_string())];
            let value = self.transport.get_json(location, &query, options).await?;
            let job: JobInfo = serde_json::from_value(value)?;

            debug!(
                job_id = %job.id,
                run_state = %job.state.run_state,
                poll = polls,
                "Job polled"
            );

            if job.state.run_state.is_failure() {
                warn!(
                    job_id = %job.id,
                    run_state = %job.state.run_state,
                    error = ?job.state.error_msg,
                    "Job failed"
                );
                return Err(CoreError::JobFailed {
                    id: job.id,
                    state: job.state.run_state.to_string(),
                    message: job.state.error_msg.unwrap_or_default(),
                });
            }

            if job.is_complete() {
                info!(
                    job_id = %job.id,
                    polls,
                    elapsed_ms = ?job.state.elapsed_time,
                    "Job completed"
                );
                return Ok(job);
            }

            if let Some(max_polls) = self.config.max_polls.filter(|&n| n > 0) {
                if polls >= max_polls {
                    warn!(job_id = %job.id, polls, "Job polling limit reached");
                    return Err(CoreError::Timeout { polls });
                }
            }
        }
    }
}

#[async_trait]
impl ProcessingService for ProcessingServiceBase {
    async fn get_jobs(&self, url: &str, options: &RequestOptions) -> Result<Vec<JobInfo>> {
        self.ensure_active()?;
        let value = self.transport.get_json(url, &[], options).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_job(&self, url: &str, options: &RequestOptions) -> Result<JobInfo> {
        self.ensure_active()?;
        let value = self.transport.get_json(url, &[], options).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn add_job(
        &self,
        url: &str,
        body: Value,
        poll_interval: Duration,
        options: &RequestOptions,
    ) -> Result<JobInfo> {
        self.ensure_active()?;

        let value = self.transport.post_json(url, &body, options).await?;
        let response: AddJobResponse = serde_json::from_value(value)?;

        if !response.succeed {
            let (code, message) = response
                .error
                .map(|e| (e.code, e.error_msg))
                .unwrap_or_else(|| (0, "job submission rejected".to_string()));
            warn!(url = %url, code, message = %message, "Job submission failed");
            return Err(CoreError::Server { code, message });
        }

        let location = response
            .new_resource_location
            .ok_or(CoreError::MissingRequired("newResourceLocation"))?;

        info!(
            url = %url,
            job_id = ?response.new_resource_id,
            "Job submitted"
        );

        let interval = if poll_interval.is_zero() {
            self.config.default_interval
        } else {
            poll_interval
        };

        self.poll(&location, interval, options).await
    }

    fn release(&self) {
        self.release_tx.release();
    }
}
