//! Block dimensions and layout defaults shared by every generator.
//!
//! A block is `SX` thick, `SY` wide and `SZ` tall; every mechanism offset in
//! the crate is expressed in these three lengths, so resizing the block
//! rescales the whole catalogue consistently.

use glam::DVec3;

/// Block thickness along its local x axis, in metres.
pub const SX: f64 = 0.015;
/// Block width along its local y axis, in metres.
pub const SY: f64 = 0.05;
/// Block height along its local z axis, in metres.
pub const SZ: f64 = 0.1;

/// Material density used to derive block mass, in kg/m^3.
pub const BLOCK_DENSITY: f64 = 1000.0;

/// Mass of one block: volume times density.
pub const BLOCK_MASS: f64 = SX * SY * SZ * BLOCK_DENSITY;

/// Half extents of the box collider for one block.
pub const BLOCK_HALF_EXTENTS: DVec3 = DVec3::new(SX / 2.0, SY / 2.0, SZ / 2.0);

/// Default spacing divisor for upright straight lines: interval = height / ratio.
pub const LINE_INTERVAL_RATIO: f64 = 1.5;

/// Default spacing divisor for curved chains: interval = SZ / ratio.
pub const CURVE_INTERVAL_RATIO: f64 = 1.8;

/// Default lateral friction coefficient for a block body.
pub const DEFAULT_FRICTION: f64 = 0.5;

/// Default restitution for a block body.
pub const DEFAULT_RESTITUTION: f64 = 0.0;
