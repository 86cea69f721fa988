//! Three synchronization strategies for one shared counter.
//!
//! The same increment loop runs under three policies: no protection at all
//! (a genuine data race, kept on purpose), a mutex held per increment, and
//! an atomic fetch-and-add. The first gives no guarantee on the final
//! value; the other two always land on the exact sum of all iterations.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// A counter that can be incremented concurrently from many tasks.
pub trait SharedCounter: Sync {
    fn increment(&self);

    /// Reads the current value. Only meaningful once all incrementing
    /// tasks have joined.
    fn value(&self) -> u64;
}

/// Unprotected counter: plain non-atomic read-modify-write on shared
/// memory. Two concurrent incrementers race, and updates are lost.
///
/// The `Send`/`Sync` impls tell the compiler this is safe when it is not.
/// That lie is the whole demonstration: in the abstract machine this is
/// undefined behavior, not merely "sometimes wrong". Do not imitate.
pub struct RacyCounter {
    value: UnsafeCell<u64>,
}

unsafe impl Send for RacyCounter {}
unsafe impl Sync for RacyCounter {}

impl RacyCounter {
    pub fn new() -> Self {
        Self {
            value: UnsafeCell::new(0),
        }
    }
}

impl Default for RacyCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCounter for RacyCounter {
    fn increment(&self) {
        // Load, add, store with nothing keeping the three steps together.
        unsafe {
            *self.value.get() += 1;
        }
    }

    fn value(&self) -> u64 {
        unsafe { *self.value.get() }
    }
}

/// Counter guarded by a mutex acquired once per increment. Exact, at the
/// cost of lock traffic on every iteration.
pub struct MutexCounter {
    value: Mutex<u64>,
}

impl MutexCounter {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(0),
        }
    }
}

impl Default for MutexCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCounter for MutexCounter {
    fn increment(&self) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }

    fn value(&self) -> u64 {
        *self.value.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Counter using an atomic fetch-and-add. Exact with no explicit lock.
/// Relaxed ordering suffices: only the count matters, and the join at the
/// end of each run establishes the happens-before for the final read.
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }
}

impl Default for AtomicCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCounter for AtomicCounter {
    fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Outcome of one two-task increment run.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub value: u64,
    pub elapsed: Duration,
}

/// Runs two concurrent tasks, each incrementing `counter` exactly `times`
/// times, and reports the final value with the wall-clock time for the
/// whole fork-join.
pub fn run_pair<C: SharedCounter>(counter: &C, times: u64) -> RunReport {
    let start = Instant::now();
    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                for _ in 0..times {
                    counter.increment();
                }
            });
        }
    });
    RunReport {
        value: counter.value(),
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutex_is_exact_over_repeated_runs() {
        for _ in 0..100 {
            let counter = MutexCounter::new();
            let report = run_pair(&counter, 1000);
            assert_eq!(report.value, 2000);
        }
    }

    #[test]
    fn test_atomic_is_exact_over_repeated_runs() {
        for _ in 0..100 {
            let counter = AtomicCounter::new();
            let report = run_pair(&counter, 1000);
            assert_eq!(report.value, 2000);
        }
    }

    #[test]
    fn test_racy_run_completes_without_exceeding_total() {
        // No exactness is claimed for the racy counter; lost updates are
        // expected. The only stable properties are that the run finishes
        // and never counts more increments than were issued.
        let counter = RacyCounter::new();
        let report = run_pair(&counter, 100_000);
        assert!(report.value > 0);
        assert!(report.value <= 200_000);
    }

    #[test]
    fn test_zero_iterations_leave_counter_at_zero() {
        let counter = AtomicCounter::new();
        let report = run_pair(&counter, 0);
        assert_eq!(report.value, 0);
    }

    #[test]
    fn test_report_measures_elapsed_time() {
        let counter = AtomicCounter::new();
        let report = run_pair(&counter, 10_000);
        assert_eq!(report.value, 20_000);
        assert!(report.elapsed > Duration::ZERO);
    }
}
