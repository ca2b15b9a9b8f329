use geo::{Bearing, Distance, Haversine, LineString, Point};

/// Coordinates closer than this are treated as coincident when deriving a
/// heading, since a bearing between overlapping points is meaningless.
const COINCIDENT_METERS: f64 = 0.5;

/// Wraps a degree value into `[0, 360)`.
#[inline]
pub fn wrap_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// The opposing compass direction, in `[0, 360)`.
#[inline]
pub fn reverse(degrees: f64) -> f64 {
    wrap_degrees(degrees + 180.0)
}

/// Signed angular difference `to - from`, normalised to `(-180, 180]`.
///
/// Positive values are clockwise (a right-hand deviation for a driver
/// heading along `from`), negative values counter-clockwise.
#[inline]
pub fn signed_delta(to: f64, from: f64) -> f64 {
    let delta = wrap_degrees(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Clockwise offset of `bearing` from `origin`, in `[0, 360)`.
///
/// Used to order incident roads around an intersection starting at the
/// reverse of the arrival direction.
#[inline]
pub fn clockwise_from(bearing: f64, origin: f64) -> f64 {
    wrap_degrees(bearing - origin)
}

/// Heading of the first non-degenerate segment of `line`, relative to due
/// north. `None` when every coordinate coincides.
pub fn departure_bearing(line: &LineString) -> Option<f64> {
    let origin = Point::from(*line.0.first()?);

    line.points()
        .find(|point| Haversine::distance(origin, *point) >= COINCIDENT_METERS)
        .map(|point| wrap_degrees(Haversine::bearing(origin, point)))
}

/// Heading of the last non-degenerate segment of `line`, i.e. the direction
/// of travel when reaching its end. `None` when every coordinate coincides.
pub fn arrival_bearing(line: &LineString) -> Option<f64> {
    let end = Point::from(*line.0.last()?);

    line.points()
        .rev()
        .find(|point| Haversine::distance(*point, end) >= COINCIDENT_METERS)
        .map(|point| wrap_degrees(Haversine::bearing(point, end)))
}
