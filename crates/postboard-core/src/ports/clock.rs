use chrono::{DateTime, Utc};

/// Time source supplied by the host.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
