//! The clock abstraction and the shared `TimeSource`.

use crate::common::TIME_FORMAT;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

/// A source of local wall time.
pub trait Clock: Send + Sync {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Formats a timestamp as `HH:mm:ss dd-MM-yyyy`.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIME_FORMAT).to_string()
}

/// Holds the single current-time string.
///
/// The value lives in a `watch` channel: a refresh replaces it wholesale and
/// every later read sees the replacement, so a reader can never observe a
/// partially written string. The value is set during construction, before any
/// task can read it.
pub struct TimeSource {
    clock: Arc<dyn Clock>,
    current: watch::Sender<String>,
}

impl TimeSource {
    /// Creates a `TimeSource` backed by the local system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(LocalClock))
    }

    /// Creates a `TimeSource` backed by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let initial = format_timestamp(clock.now());
        let (current, _) = watch::channel(initial);
        Self { clock, current }
    }

    /// Formats "now" and publishes it as the current value.
    pub fn refresh(&self) {
        let value = format_timestamp(self.clock.now());
        trace!("Publishing {}", value);
        self.current.send_replace(value);
    }

    /// Returns the most recently published value.
    pub fn read(&self) -> String {
        self.current.borrow().clone()
    }

    /// Subscribes to changes of the current value.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.subscribe()
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::thread;

    /// Advances by one second on every call.
    struct SteppingClock {
        base: NaiveDateTime,
        calls: AtomicI64,
    }

    impl SteppingClock {
        fn new(base: NaiveDateTime) -> Self {
            Self {
                base,
                calls: AtomicI64::new(0),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> NaiveDateTime {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.base + chrono::Duration::seconds(n)
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn assert_well_formed(value: &str) {
        assert_eq!(value.len(), 19, "unexpected length: {value:?}");
        assert!(
            NaiveDateTime::parse_from_str(value, TIME_FORMAT).is_ok(),
            "not in clock format: {value:?}"
        );
    }

    #[test]
    fn test_format_pads_every_field() {
        assert_eq!(format_timestamp(at(2024, 3, 5, 9, 7, 2)), "09:07:02 05-03-2024");
    }

    #[test]
    fn test_format_uses_24_hour_clock() {
        assert_eq!(format_timestamp(at(2023, 12, 31, 23, 59, 59)), "23:59:59 31-12-2023");
        assert_eq!(format_timestamp(at(2024, 1, 1, 0, 0, 0)), "00:00:00 01-01-2024");
        assert_eq!(format_timestamp(at(2024, 6, 15, 13, 30, 45)), "13:30:45 15-06-2024");
    }

    #[test]
    fn test_local_clock_formats_cleanly() {
        assert_well_formed(&format_timestamp(LocalClock.now()));
    }

    #[test]
    fn test_value_is_set_on_construction() {
        let source = TimeSource::new();
        let value = source.read();
        assert!(!value.is_empty());
        assert_well_formed(&value);
    }

    #[test]
    fn test_refresh_replaces_construction_value() {
        let source = TimeSource::with_clock(Arc::new(SteppingClock::new(at(2024, 3, 5, 9, 7, 2))));
        assert_eq!(source.read(), "09:07:02 05-03-2024");

        source.refresh();
        assert_eq!(source.read(), "09:07:03 05-03-2024");
    }

    #[test]
    fn test_read_is_idempotent() {
        let source = TimeSource::with_clock(Arc::new(SteppingClock::new(at(2024, 3, 5, 9, 7, 2))));
        source.refresh();
        assert_eq!(source.read(), source.read());
    }

    #[tokio::test]
    async fn test_subscriber_sees_refresh() {
        let source = TimeSource::with_clock(Arc::new(SteppingClock::new(at(2024, 3, 5, 9, 7, 2))));
        let mut rx = source.subscribe();

        source.refresh();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "09:07:03 05-03-2024");
    }

    #[test]
    fn test_concurrent_reads_only_see_published_values() {
        const REFRESHES: i64 = 2_000;
        let base = at(2024, 3, 5, 9, 7, 2);
        let source = Arc::new(TimeSource::with_clock(Arc::new(SteppingClock::new(base))));

        // The construction value plus one per refresh.
        let published: HashSet<String> = (0..=REFRESHES)
            .map(|n| format_timestamp(base + chrono::Duration::seconds(n)))
            .collect();

        let writer = {
            let source = source.clone();
            thread::spawn(move || {
                for _ in 0..REFRESHES {
                    source.refresh();
                }
            })
        };
        let reader = {
            let source = source.clone();
            thread::spawn(move || {
                let mut seen = Vec::new();
                for _ in 0..REFRESHES {
                    seen.push(source.read());
                }
                seen
            })
        };

        writer.join().unwrap();
        let seen = reader.join().unwrap();
        for value in &seen {
            assert!(published.contains(value), "read a value nobody published: {value:?}");
        }
        assert_eq!(
            source.read(),
            format_timestamp(base + chrono::Duration::seconds(REFRESHES))
        );
    }
}
