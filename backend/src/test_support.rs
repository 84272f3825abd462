//! Test doubles shared by unit tests (in `src/`) and integration tests.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

mod clock;
mod slugs;
mod state;

pub use clock::MutableClock;
pub use slugs::ScriptedSlugGenerator;
pub use state::{MemoryHarness, TEST_BASE_URL, memory_harness};
