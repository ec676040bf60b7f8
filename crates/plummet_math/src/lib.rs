//! 3D Mathematics for Plummet
//!
//! This crate provides the small vector type shared by the physics
//! engine and the host.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components

mod vec3;

pub use vec3::Vec3;
