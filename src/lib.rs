//! Reusable queue primitives sharing a common trait family: a bounded
//! blocking FIFO with cancellable waits, an unbounded lock-free FIFO, and a
//! bounded priority queue with a thread-safe wrapper.

pub mod collections;
pub mod concurrent;
