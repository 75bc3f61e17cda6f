//! In-memory backend for the Chronicle event log.
//!
//! Everything lives in a single lock-guarded map; no operation
//! performs blocking I/O, so the async surface is about not stalling
//! the caller, not about offloading work.

mod store;

pub use store::MemoryStore;
