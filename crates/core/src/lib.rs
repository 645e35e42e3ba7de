//! Domain logic for the SiliconEdge site backend.
//!
//! This crate performs no I/O against the document store or object storage.
//! It holds the pieces both the repository layer and the HTTP layer share:
//! error types, search filtering, phase sequencing, layout settings, the
//! site route table and static content, input validation, upload naming,
//! and the in-memory mirror of remote collections.

pub mod content;
pub mod dates;
pub mod error;
pub mod layout;
pub mod mirror;
pub mod roles;
pub mod search;
pub mod sequencing;
pub mod storage;
pub mod types;
pub mod validation;
