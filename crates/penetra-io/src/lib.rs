//! # penetra-io
//!
//! Penalty input/output contract and batch validation.
//!
//! Defines the boundary types that external systems (CLI, training
//! pipelines) use to hand batches to the collision penalty and read
//! results back.

pub mod contract;
pub mod validator;
