#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative placement state for Blockyard.
//!
//! [`OccupancyMap`] owns every cell-to-object binding and is the only place
//! overlap and bounds invariants are enforced. [`Scene`] is a self-contained
//! entity arena that satisfies the host lifecycle contract for adapters and
//! tests that do not embed the engine in a larger runtime.

mod occupancy;
mod scene;

pub use occupancy::OccupancyMap;
pub use scene::{Scene, SceneEntity};
