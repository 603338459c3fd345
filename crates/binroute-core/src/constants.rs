//! Shared numeric constants.

/// Mean Earth radius used for great-circle distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Route distances are reported with this many decimal places.
pub const DISTANCE_DECIMALS: i32 = 2;

/// Minimum number of distinct vertices for a boundary ring.
pub const MIN_RING_VERTICES: usize = 3;

/// Default pixel margin applied around fitted content.
pub const VIEW_PADDING_PX: u32 = 50;

/// Events a broadcast receiver may lag behind before it misses some.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
