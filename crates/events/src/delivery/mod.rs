//! External delivery channels for site events.

pub mod email;
