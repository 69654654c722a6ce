use tracing::{debug, error};

use crate::error::{NavigationError, Result};
use crate::math::TOLERANCE;
use crate::scene::{DriveController, SceneGraph};

use super::highlight::HighlightDriver;
use super::speed::speed_cap;
use super::waypoints::{Waypoint, WaypointState};

/// Navigator tuning, passed explicitly at construction.
#[derive(Debug, Clone, Copy)]
pub struct NavigatorConfig {
    /// Distance below which a waypoint counts as arrived.
    pub reach_distance: f64,
    /// Loop back to the first waypoint after the last.
    pub loop_waypoints: bool,
    /// Blend the speed cap down when approaching a waypoint.
    pub slow_near_waypoints: bool,
}

impl NavigatorConfig {
    /// Creates a config, validating the reach distance.
    ///
    /// # Errors
    ///
    /// Returns an error if `reach_distance` is not positive.
    pub fn new(reach_distance: f64, loop_waypoints: bool, slow_near_waypoints: bool) -> Result<Self> {
        let config = Self {
            reach_distance,
            loop_waypoints,
            slow_near_waypoints,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `reach_distance` is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.reach_distance < TOLERANCE {
            return Err(NavigationError::InvalidReachDistance(self.reach_distance).into());
        }
        Ok(())
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            reach_distance: 5.0,
            loop_waypoints: true,
            slow_near_waypoints: true,
        }
    }
}

/// Advances an AI agent through an ordered sequence of waypoints.
///
/// Each tick the navigator reads the agent position from the drive
/// controller, tests arrival against the reach distance, advances the
/// target on arrival, and publishes the target pose and a speed cap back
/// to the controller. Visual highlighting is delegated to a
/// [`HighlightDriver`] and the speed policy to [`speed_cap`]; this type
/// owns only the traversal state machine.
#[derive(Debug)]
pub struct WaypointNavigator {
    config: NavigatorConfig,
    highlight: HighlightDriver,
    waypoints: Vec<Waypoint>,
    current: usize,
    complete: bool,
}

impl WaypointNavigator {
    /// Creates a navigator with no waypoints; it stays inert until
    /// [`Self::set_waypoints`] succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. Configs built as
    /// struct literals are re-validated here so a zero reach distance can
    /// never feed the speed policy.
    pub fn new(config: NavigatorConfig, highlight: HighlightDriver) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            highlight,
            waypoints: Vec::new(),
            current: 0,
            complete: false,
        })
    }

    /// Replaces the waypoint list and restarts traversal from index 0.
    ///
    /// # Errors
    ///
    /// Returns an error if `waypoints` is empty; the navigator is left
    /// disabled (empty list) in that case.
    pub fn set_waypoints(
        &mut self,
        waypoints: Vec<Waypoint>,
        scene: &mut dyn SceneGraph,
        drive: &mut dyn DriveController,
    ) -> Result<()> {
        if waypoints.is_empty() {
            self.waypoints.clear();
            self.current = 0;
            self.complete = false;
            error!("no waypoints assigned, navigator disabled");
            return Err(NavigationError::NoWaypoints.into());
        }
        self.waypoints = waypoints;
        for waypoint in &mut self.waypoints {
            waypoint.state = WaypointState::Normal;
        }
        self.highlight.reset_all(scene, &self.waypoints);
        self.reset(scene, drive);
        Ok(())
    }

    /// Restarts traversal from waypoint 0. Idempotent; callable at any time.
    pub fn reset(&mut self, scene: &mut dyn SceneGraph, drive: &mut dyn DriveController) {
        if self.waypoints.is_empty() {
            return;
        }
        self.set_state(scene, self.current, WaypointState::Normal);
        self.current = 0;
        self.complete = false;
        self.activate_current(scene, drive);
    }

    /// Runs one simulation step.
    ///
    /// No-op once complete or while no waypoints are assigned. Arrival is
    /// tested against the reach distance; the speed cap is recomputed and
    /// published every tick, independent of arrival.
    pub fn tick(&mut self, drive: &mut dyn DriveController, scene: &mut dyn SceneGraph) {
        if self.complete || self.waypoints.is_empty() {
            return;
        }

        let position = drive.current_position();
        let distance = (position - self.waypoints[self.current].pose.position).norm();
        if distance <= self.config.reach_distance {
            self.advance(scene, drive);
        }

        // Distance to the (possibly just advanced) target drives the cap.
        let distance = (position - self.waypoints[self.current].pose.position).norm();
        drive.set_speed_cap(speed_cap(
            distance,
            self.config.reach_distance,
            self.config.slow_near_waypoints,
        ));
    }

    /// Whether the run has finished (or, when looping, wrapped once).
    ///
    /// With `loop_waypoints` enabled this reports `true` immediately after
    /// the first wrap-around even though the index resets to 0. Callers
    /// gating one-shot logic (such as a scene transition) on this accessor
    /// will fire after a single lap.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Index of the current target waypoint.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The waypoint list being traversed.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    fn advance(&mut self, scene: &mut dyn SceneGraph, drive: &mut dyn DriveController) {
        self.set_state(scene, self.current, WaypointState::Normal);
        self.current += 1;

        if self.current >= self.waypoints.len() {
            self.complete = true;
            if self.config.loop_waypoints {
                self.current = 0;
            } else {
                self.current = self.waypoints.len() - 1;
                debug!("all waypoints reached");
                return;
            }
        }

        self.activate_current(scene, drive);
    }

    fn activate_current(&mut self, scene: &mut dyn SceneGraph, drive: &mut dyn DriveController) {
        self.set_state(scene, self.current, WaypointState::Active);
        drive.set_target(self.waypoints[self.current].pose);
        debug!(index = self.current, "moving to waypoint");
    }

    fn set_state(&mut self, scene: &mut dyn SceneGraph, index: usize, state: WaypointState) {
        if let Some(waypoint) = self.waypoints.get_mut(index) {
            waypoint.state = state;
            self.highlight.apply(scene, index, waypoint);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::navigation::highlight::HighlightMaterials;
    use crate::navigation::speed::{APPROACH_SPEED_CAP, NOMINAL_SPEED_CAP};
    use crate::scene::{MemoryScene, Pose, SteeringInput};
    use approx::assert_relative_eq;

    /// Minimal drive controller recording everything published to it.
    struct StubDrive {
        position: Point3,
        targets: Vec<Pose>,
        caps: Vec<f64>,
    }

    impl StubDrive {
        fn at(position: Point3) -> Self {
            Self {
                position,
                targets: Vec::new(),
                caps: Vec::new(),
            }
        }
    }

    impl DriveController for StubDrive {
        fn set_target(&mut self, pose: Pose) {
            self.targets.push(pose);
        }

        fn set_speed_cap(&mut self, cap: f64) {
            self.caps.push(cap);
        }

        fn current_position(&self) -> Point3 {
            self.position
        }

        fn steering_input(&self) -> SteeringInput {
            SteeringInput::default()
        }
    }

    fn three_waypoints() -> Vec<Waypoint> {
        [0.0, 50.0, 100.0]
            .into_iter()
            .map(|z| Waypoint::new(Pose::from_position(Point3::new(0.0, 0.0, z))))
            .collect()
    }

    fn navigator(loop_waypoints: bool) -> WaypointNavigator {
        let config = NavigatorConfig::new(5.0, loop_waypoints, true).unwrap();
        WaypointNavigator::new(config, HighlightDriver::new(None)).unwrap()
    }

    #[test]
    fn empty_waypoint_list_disables_navigator() {
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::origin());
        let mut nav = navigator(false);

        assert!(nav.set_waypoints(Vec::new(), &mut scene, &mut drive).is_err());
        nav.tick(&mut drive, &mut scene);
        assert!(drive.targets.is_empty());
        assert!(drive.caps.is_empty());
    }

    #[test]
    fn set_waypoints_publishes_first_target() {
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::new(0.0, 0.0, -100.0));
        let mut nav = navigator(false);

        nav.set_waypoints(three_waypoints(), &mut scene, &mut drive)
            .unwrap();
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.is_complete());
        assert_eq!(drive.targets.len(), 1);
        assert_relative_eq!(drive.targets[0].position, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn arrival_boundary_at_reach_distance() {
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::new(0.0, 0.0, -5.1));
        let mut nav = navigator(false);
        nav.set_waypoints(three_waypoints(), &mut scene, &mut drive)
            .unwrap();

        // 5.1 away: not arrived.
        nav.tick(&mut drive, &mut scene);
        assert_eq!(nav.current_index(), 0);

        // 4.9 away: arrives and advances on the next tick.
        drive.position = Point3::new(0.0, 0.0, -4.9);
        nav.tick(&mut drive, &mut scene);
        assert_eq!(nav.current_index(), 1);
        assert_relative_eq!(
            drive.targets.last().unwrap().position,
            Point3::new(0.0, 0.0, 50.0)
        );
    }

    #[test]
    fn looping_completes_on_first_wrap_with_index_reset() {
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::origin());
        let mut nav = navigator(true);
        nav.set_waypoints(three_waypoints(), &mut scene, &mut drive)
            .unwrap();

        for z in [0.0, 50.0, 100.0] {
            drive.position = Point3::new(0.0, 0.0, z);
            nav.tick(&mut drive, &mut scene);
        }

        assert!(nav.is_complete());
        assert_eq!(nav.current_index(), 0);
        // The wrap still republishes waypoint 0 as the target.
        assert_relative_eq!(
            drive.targets.last().unwrap().position,
            Point3::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn non_looping_completes_at_last_index_with_no_further_publishes() {
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::origin());
        let mut nav = navigator(false);
        nav.set_waypoints(three_waypoints(), &mut scene, &mut drive)
            .unwrap();

        for z in [0.0, 50.0, 100.0] {
            drive.position = Point3::new(0.0, 0.0, z);
            nav.tick(&mut drive, &mut scene);
        }

        assert!(nav.is_complete());
        assert_eq!(nav.current_index(), 2);

        let targets_published = drive.targets.len();
        let caps_published = drive.caps.len();
        nav.tick(&mut drive, &mut scene);
        nav.tick(&mut drive, &mut scene);
        assert_eq!(drive.targets.len(), targets_published);
        assert_eq!(drive.caps.len(), caps_published);
    }

    #[test]
    fn cruising_far_from_target_publishes_nominal_cap() {
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::new(0.0, 0.0, -30.0));
        let mut nav = navigator(false);
        nav.set_waypoints(three_waypoints(), &mut scene, &mut drive)
            .unwrap();

        nav.tick(&mut drive, &mut scene);
        assert_relative_eq!(*drive.caps.last().unwrap(), NOMINAL_SPEED_CAP);
    }

    #[test]
    fn cap_dips_when_the_next_target_is_inside_the_slow_band() {
        // Waypoints 3 apart: right after arriving at one, the next target is
        // already within reach_distance / 1.5, so the lerp unsaturates.
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::origin());
        let mut nav = navigator(false);
        let waypoints: Vec<Waypoint> = [0.0, 3.0, 6.0]
            .into_iter()
            .map(|z| Waypoint::new(Pose::from_position(Point3::new(0.0, 0.0, z))))
            .collect();
        nav.set_waypoints(waypoints, &mut scene, &mut drive).unwrap();

        // At z=0 the agent arrives at waypoint 0 and retargets waypoint 1,
        // 3 units away: cap = lerp(30, 80, clamp01(1.5 * 3 / 5)) = 75.
        nav.tick(&mut drive, &mut scene);
        assert_eq!(nav.current_index(), 1);
        let cap = *drive.caps.last().unwrap();
        assert_relative_eq!(cap, 75.0, epsilon = 1e-9);
        assert!((APPROACH_SPEED_CAP..NOMINAL_SPEED_CAP).contains(&cap));
    }

    #[test]
    fn reset_restores_first_waypoint_after_completion() {
        let mut scene = MemoryScene::new();
        let mut drive = StubDrive::at(Point3::origin());
        let mut nav = navigator(false);
        nav.set_waypoints(three_waypoints(), &mut scene, &mut drive)
            .unwrap();

        for z in [0.0, 50.0, 100.0] {
            drive.position = Point3::new(0.0, 0.0, z);
            nav.tick(&mut drive, &mut scene);
        }
        assert!(nav.is_complete());

        nav.reset(&mut scene, &mut drive);
        assert!(!nav.is_complete());
        assert_eq!(nav.current_index(), 0);
        assert_relative_eq!(
            drive.targets.last().unwrap().position,
            Point3::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn highlight_follows_the_active_waypoint() {
        let mut scene = MemoryScene::new();
        let normal = scene.add_material("normal");
        let active = scene.add_material("active");
        let container = scene.create_empty("waypoints", None);

        let mut waypoints = three_waypoints();
        for (i, waypoint) in waypoints.iter_mut().enumerate() {
            let entity = scene.create_empty(&format!("wp_{i}"), Some(container));
            waypoint.entity = Some(entity);
        }
        let entities: Vec<_> = waypoints.iter().map(|w| w.entity.unwrap()).collect();

        let config = NavigatorConfig::new(5.0, false, true).unwrap();
        let driver = HighlightDriver::new(Some(HighlightMaterials { normal, active }));
        let mut nav = WaypointNavigator::new(config, driver).unwrap();
        let mut drive = StubDrive::at(Point3::origin());
        nav.set_waypoints(waypoints, &mut scene, &mut drive).unwrap();

        assert_eq!(scene.entity(entities[0]).unwrap().material, Some(active));
        assert_eq!(scene.entity(entities[1]).unwrap().material, Some(normal));

        // Arrive at waypoint 0.
        nav.tick(&mut drive, &mut scene);
        assert_eq!(scene.entity(entities[0]).unwrap().material, Some(normal));
        assert_eq!(scene.entity(entities[1]).unwrap().material, Some(active));
    }

    #[test]
    fn invalid_reach_distance_is_rejected() {
        assert!(NavigatorConfig::new(0.0, true, true).is_err());
        assert!(NavigatorConfig::new(-1.0, true, true).is_err());
    }

    #[test]
    fn struct_literal_config_is_revalidated_at_construction() {
        let config = NavigatorConfig {
            reach_distance: 0.0,
            ..NavigatorConfig::default()
        };
        assert!(WaypointNavigator::new(config, HighlightDriver::new(None)).is_err());
    }
}
