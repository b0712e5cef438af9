// Port Layer - Interfaces for external collaborators

pub mod processing_service;
pub mod rest_transport;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use processing_service::ProcessingService;
pub use rest_transport::{RequestOptions, RestTransport};
pub use time_provider::{SystemTimeProvider, TimeProvider};
