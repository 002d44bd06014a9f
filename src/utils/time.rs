use chrono::{DateTime, SubsecRound, Utc};

/// Wall clock in UTC, truncated to whole seconds. Timestamps are stored
/// and compared at second precision in a fixed zone.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
