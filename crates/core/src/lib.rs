//! Domain types and validation rules for the RTSP.io backend.
//!
//! Nothing in this crate performs I/O; the database and HTTP layers build on
//! the types and checks defined here.

pub mod error;
pub mod overlay;
pub mod rtsp;
pub mod types;
