// Processing Job Records
//
// Shapes of the distributed-analysis job resources returned by the server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Job ID assigned by the server
pub type JobId = String;

/// Run state of a server-side job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Waiting,
    Running,
    Finished,
    Failed,
    Lost,
    Killed,
    #[serde(other)]
    Unknown,
}

impl RunState {
    /// Failure-terminal states
    pub fn is_failure(&self) -> bool {
        matches!(self, RunState::Failed | RunState::Lost | RunState::Killed)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Waiting => write!(f, "WAITING"),
            RunState::Running => write!(f, "RUNNING"),
            RunState::Finished => write!(f, "FINISHED"),
            RunState::Failed => write!(f, "FAILED"),
            RunState::Lost => write!(f, "LOST"),
            RunState::Killed => write!(f, "KILLED"),
            RunState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// `state` block of a job resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub run_state: RunState,
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>, // epoch ms
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub elapsed_time: Option<i64>, // ms
}

/// Job resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub id: JobId,
    pub state: JobStatus,
    /// Analysis settings echoed back by the server; carries `serviceInfo`
    /// once result services are published.
    #[serde(default)]
    pub setting: Option<Value>,
}

impl JobInfo {
    /// Finished and its result services are available
    pub fn is_complete(&self) -> bool {
        self.state.run_state == RunState::Finished
            && self
                .setting
                .as_ref()
                .and_then(|s| s.get("serviceInfo"))
                .is_some_and(|info| !info.is_null())
    }
}

/// Error block of a failed POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub error_msg: String,
}

/// Response to a job-creation POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddJobResponse {
    pub succeed: bool,
    #[serde(default, rename = "newResourceID")]
    pub new_resource_id: Option<String>,
    #[serde(default)]
    pub new_resource_location: Option<String>,
    #[serde(default)]
    pub error: Option<ServerError>,
}
