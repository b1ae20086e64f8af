//! Integration test common infrastructure.
//!
//! Provides a small in-memory network (one channel, a handful of clients,
//! a peer server) and helpers for asserting on the lines mode handling
//! produces.

pub mod network;

#[allow(unused_imports)]
pub use network::TestNetwork;
