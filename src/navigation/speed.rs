use crate::math::{clamp01, lerp};

/// Nominal maximum speed published when cruising between waypoints.
pub const NOMINAL_SPEED_CAP: f64 = 80.0;

/// Speed cap approached as the agent closes on a waypoint.
pub const APPROACH_SPEED_CAP: f64 = 30.0;

/// Computes the speed cap for the current distance to the target waypoint.
///
/// Within twice the reach distance the cap blends from
/// [`NOMINAL_SPEED_CAP`] down toward [`APPROACH_SPEED_CAP`] as
/// `lerp(30, 80, clamp01(1.5 · distance / reach_distance))`, giving a
/// continuous deceleration profile. Outside that band, or with slowing
/// disabled, the nominal cap applies. Evaluated every tick regardless of
/// arrival.
#[must_use]
pub fn speed_cap(distance: f64, reach_distance: f64, slow_near_waypoint: bool) -> f64 {
    if slow_near_waypoint && distance < reach_distance * 2.0 {
        lerp(
            APPROACH_SPEED_CAP,
            NOMINAL_SPEED_CAP,
            clamp01(1.5 * distance / reach_distance),
        )
    } else {
        NOMINAL_SPEED_CAP
    }
}
