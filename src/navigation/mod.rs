pub mod highlight;
pub mod navigator;
pub mod speed;
pub mod waypoints;

pub use highlight::{HighlightDriver, HighlightMaterials};
pub use navigator::{NavigatorConfig, WaypointNavigator};
pub use speed::{speed_cap, APPROACH_SPEED_CAP, NOMINAL_SPEED_CAP};
pub use waypoints::{instantiate_markers, waypoints_from_curve, Waypoint, WaypointState};
