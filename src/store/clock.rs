//! Millisecond clock that never repeats a value.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Wall-clock milliseconds, bumped by one whenever two readings would collide.
///
/// Student identifiers and upload file names both come from here, so the two
/// are unique for the lifetime of the process even under concurrent requests.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: AtomicU64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next value: the current time, or one past the previous value if the
    /// clock has not advanced (or went backwards).
    pub fn next(&self) -> u64 {
        let now = now_millis();
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_strictly_increasing() {
        let clock = MonotonicClock::new();
        let mut previous = clock.next();
        for _ in 0..1_000 {
            let value = clock.next();
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn test_tracks_wall_clock() {
        let clock = MonotonicClock::new();
        let before = now_millis();
        let value = clock.next();
        assert!(value >= before);
    }

    #[test]
    fn test_unique_across_threads() {
        let clock = Arc::new(MonotonicClock::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || (0..500).map(|_| clock.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate clock value {}", value);
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }
}
