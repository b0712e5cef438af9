// Time Provider Port
//
// Job polls carry a `_t` timestamp so caching proxies never answer them
// from cache; tests pin it through this port.

/// Source of wall-clock time
pub trait TimeProvider: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
