//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the journal.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Mutations are single transactions; readers never observe partial writes.
//! - Orphan tag cleanup runs inside the transaction of the mutation that
//!   triggered it, never as a deferred task.

pub mod journal_repo;
