/// Default page number for pagination
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for pagination
pub const DEFAULT_LIMIT: i64 = 10;

/// Mean Earth radius used by the haversine distance
pub const EARTH_RADIUS_KM: f64 = 6371.0;
