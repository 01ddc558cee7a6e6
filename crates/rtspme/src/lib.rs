//! RTSP.me REST client.
//!
//! RTSP.me turns an RTSP camera URL into a hosted web player. This crate
//! wraps the single conversion call, maps its response into embed metadata,
//! and classifies failures. Calls are bounded by a fixed timeout and never
//! retried.

pub mod api;

pub use api::{Camera, ConvertRequest, Credentials, Embed, RtspMeClient, RtspMeError};
