// Application Layer - job services and the shared processing base

pub mod jobs;
pub mod processing_base;
pub mod release;

pub use jobs::{JobsService, ServiceOptions, SummaryAttributesJobsService};
pub use processing_base::{PollConfig, ProcessingServiceBase, DEFAULT_POLL_INTERVAL};
pub use release::{release_channel, ReleaseSender, ReleaseToken};
