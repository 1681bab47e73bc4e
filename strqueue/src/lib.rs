//! A singly-linked queue of owned strings.
//!
//! [`Queue`] supports insertion at both ends, removal at the head, in-place
//! reversal and a stable merge sort in natural order (see [`natcmp`]).
//! [`handle`] offers the same operations over a queue that may be absent.

mod error;
pub use error::{Error, Result};

mod storage;
pub use storage::FaultInjector;

mod queue;
pub use queue::{Iter, Queue};

mod sort;

pub mod handle;
