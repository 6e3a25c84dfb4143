//! # Lantern Test Suite
//!
//! Integration scenarios exercising the control API end to end against
//! in-memory collaborators:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── control_api.rs     # envelope contracts per endpoint
//!     ├── bootstrap_flow.rs  # configure → create → bulk append → lookup
//!     └── observability.rs   # publisher gauges and age derivation
//! ```
//!
//! Run with `cargo test -p lantern-tests`.

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
