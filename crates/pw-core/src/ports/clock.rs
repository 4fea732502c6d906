/// Source of capture timestamps.
///
/// `now_ms` is wall-clock Unix time in milliseconds. Every emitted snapshot
/// is stamped with it as `captured_at_ms`; the engine never consults it for
/// scheduling, so implementations owe no monotonicity guarantee.
pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;
}
