//! Common Test Utilities
//!
//! Shared helpers for assembling scripts and transactions by hand and for
//! driving the parser without a live node.

#![allow(dead_code)]

pub mod rpc_helpers;
pub mod script_builder;

pub use rpc_helpers::{FailingSource, MemorySource};
pub use script_builder::{bop_output_script, to_hex, transaction, ScriptAssembler};
