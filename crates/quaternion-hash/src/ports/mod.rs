//! Ports Layer - Trait definitions
//!
//! Inbound (driving) ports only: the hasher has no outbound dependencies.

pub mod inbound;

pub use inbound::QuaternionHashApi;
