//! Deterministic simulation module
//!
//! Target motion lives here. This module must stay pure:
//! - One `update` per target per frame
//! - Injected RNG only
//! - Stable iteration order (list order)
//! - No raster or device dependencies

pub mod collision;
pub mod spawn;
pub mod target;

pub use collision::{center_distance, resolve_collisions};
pub use spawn::create_targets;
pub use target::{Target, TargetDimensions};
