//! Unit tests for job service delegation

use super::*;
use crate::domain::{JobStatus, RunState, StatisticAnalystMode, SummaryAttributesJobsOptions};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    GetJobs(String),
    GetJob(String),
    AddJob(String, Value, Duration),
}

/// ProcessingService that records calls and answers with a canned job
#[derive(Default)]
struct RecordingService {
    calls: Mutex<Vec<Call>>,
    released: AtomicBool,
    seen_options: Mutex<Vec<RequestOptions>>,
}

impl RecordingService {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

fn canned_job(id: &str) -> JobInfo {
    JobInfo {
        id: id.to_string(),
        state: JobStatus {
            run_state: RunState::Finished,
            error_msg: None,
            start_time: None,
            end_time: None,
            elapsed_time: None,
        },
        setting: None,
    }
}

#[async_trait]
impl ProcessingService for RecordingService {
    async fn get_jobs(&self, url: &str, options: &RequestOptions) -> Result<Vec<JobInfo>> {
        self.calls.lock().unwrap().push(Call::GetJobs(url.to_string()));
        self.seen_options.lock().unwrap().push(options.clone());
        Ok(vec![canned_job("a"), canned_job("b")])
    }

    async fn get_job(&self, url: &str, options: &RequestOptions) -> Result<JobInfo> {
        self.calls.lock().unwrap().push(Call::GetJob(url.to_string()));
        self.seen_options.lock().unwrap().push(options.clone());
        Ok(canned_job("a"))
    }

    async fn add_job(
        &self,
        url: &str,
        body: Value,
        poll_interval: Duration,
        options: &RequestOptions,
    ) -> Result<JobInfo> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::AddJob(url.to_string(), body, poll_interval));
        self.seen_options.lock().unwrap().push(options.clone());
        Ok(canned_job("new"))
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

fn service(url: &str) -> (Arc<RecordingService>, SummaryAttributesJobsService) {
    let base = Arc::new(RecordingService::default());
    let service = SummaryAttributesJobsService::new(url, base.clone(), ServiceOptions::default());
    (base, service)
}

#[test]
fn test_working_url_suffix() {
    let (_, service) = service("http://host/svc");
    assert_eq!(
        service.url(),
        Some("http://host/svc/spatialanalyst/summaryattributes")
    );
}

#[test]
fn test_working_url_trailing_slash() {
    let (_, service) = service("http://host/svc/");
    assert_eq!(
        service.url(),
        Some("http://host/svc/spatialanalyst/summaryattributes")
    );
}

#[tokio::test]
async fn test_list_jobs_passes_through() {
    let (base, service) = service("http://host/svc");

    let jobs = service.list_jobs().await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(
        base.calls(),
        vec![Call::GetJobs(
            "http://host/svc/spatialanalyst/summaryattributes".to_string()
        )]
    );
}

#[tokio::test]
async fn test_get_job_delegates_once_with_id_url() {
    let (base, service) = service("http://host/svc");

    service.get_job("job-7").await.unwrap();

    assert_eq!(
        base.calls(),
        vec![Call::GetJob(
            "http://host/svc/spatialanalyst/summaryattributes/job-7".to_string()
        )]
    );
}

#[tokio::test]
async fn test_submit_job_sends_request_body() {
    let (base, service) = service("http://host/svc");
    let params = SummaryAttributesJobsParameter::new(SummaryAttributesJobsOptions {
        dataset_name: Some("taxi".to_string()),
        statistic_modes: Some(vec![StatisticAnalystMode::Sum]),
        ..Default::default()
    });

    let job = service
        .submit_job(&params, Duration::from_secs(2))
        .await
        .unwrap();

    assert_eq!(job.id, "new");
    assert_eq!(
        base.calls(),
        vec![Call::AddJob(
            "http://host/svc/spatialanalyst/summaryattributes".to_string(),
            json!({"input": {"datasetName": "taxi"}, "analyst": {"statisticModes": "sum"}}),
            Duration::from_secs(2),
        )]
    );
}

#[tokio::test]
async fn test_submit_invalid_params_never_reaches_base() {
    let (base, service) = service("http://host/svc");

    let err = service
        .submit_job(&SummaryAttributesJobsParameter::default(), Duration::ZERO)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::MissingRequired("datasetName")));
    assert!(base.calls().is_empty());
}

#[tokio::test]
async fn test_options_reach_base() {
    let base = Arc::new(RecordingService::default());
    let mut headers = BTreeMap::new();
    headers.insert("X-Request-Source".to_string(), "sdk".to_string());

    let service = SummaryAttributesJobsService::new(
        "http://host/svc",
        base.clone(),
        ServiceOptions {
            headers: Some(headers.clone()),
            timeout: Some(Duration::from_secs(5)),
        },
    );
    service.list_jobs().await.unwrap();

    let seen = base.seen_options.lock().unwrap();
    assert_eq!(seen[0].headers, headers);
    assert_eq!(seen[0].timeout, Some(Duration::from_secs(5)));
}

#[tokio::test]
async fn test_release_clears_handle_and_base() {
    let (base, mut service) = service("http://host/svc");

    service.release();

    assert_eq!(service.url(), None);
    assert!(base.released.load(Ordering::SeqCst));
    assert!(matches!(
        service.get_job("job-7").await,
        Err(CoreError::Released)
    ));
    assert!(base.calls().is_empty());
}
