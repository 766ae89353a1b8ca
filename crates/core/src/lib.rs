//! # Warden Core
//!
//! Platform-independent building blocks shared by the Warden bot and its
//! health service: the error taxonomy, the permission gate, the ticket
//! ownership codec and naming rules, the audit log event model and the
//! validation rules applied to slash command options.
//!
//! Nothing in this crate talks to Discord. Every function here is pure and can
//! be exercised without a live gateway connection.

/// Error taxonomy shared by every command handler
pub mod errors;
/// Domain models and the pure rules that operate on them
pub mod models;
