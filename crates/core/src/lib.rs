// iServer Core - Parameter Records, Ports & Job Services
// NO HTTP dependencies (transports are adapters behind port::RestTransport)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{CoreError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
