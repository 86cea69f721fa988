//! Shared-memory concurrency hazards and their mitigations.
//!
//! Two independent demonstrations share this crate: a parallel matrix
//! multiplier that fans out one task per output cell, and a race-condition
//! harness comparing three synchronization strategies for a shared counter
//! (none, mutex, atomic). The unprotected strategy is a deliberate data
//! race — the hazard is the exhibit, not a defect to be fixed.

pub mod counter;
pub mod matrix;
pub mod sink;

pub use counter::{run_pair, AtomicCounter, MutexCounter, RacyCounter, RunReport, SharedCounter};
pub use matrix::{multiply_parallel, multiply_seq, Matrix, MatrixError};
pub use sink::LineSink;
