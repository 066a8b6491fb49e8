// src/lib.rs
//! # doom_bsp
//!
//! Spatial queries against static, precomputed Doom level geometry: which
//! convex subsector contains a point, and which side of a partition line a
//! point or bounding box lies on. Level data is decoded once from the packed
//! lump formats into a [`level::LevelGeometry`] store and queried read-only
//! afterwards, so a populated store can be shared freely between threads.

pub mod bsp;
pub mod level;
pub mod map;
