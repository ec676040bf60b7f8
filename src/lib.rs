//! Plummet - drop-race simulation host
//!
//! The physics core lives in `plummet_physics`; this crate carries the
//! host-side pieces: layered configuration and the demo course used by
//! the headless runner binary.

pub mod config;
pub mod course;
