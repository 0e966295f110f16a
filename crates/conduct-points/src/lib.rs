//! Training/conduct point (điểm rèn luyện) engine.
//!
//! [`scoring`] holds the computation; [`config`], [`telemetry`] and [`error`]
//! carry the ambient setup shared by binaries built on top of it.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
