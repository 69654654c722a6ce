use tracing::{debug, warn};

use crate::scene::Pose;

/// Freeze progress after an accepted respawn.
///
/// A single-threaded timer state machine: the system is armed until a
/// respawn is accepted, waits a fixed number of ticks while the vehicle is
/// frozen, and resolves back to armed when the countdown ends. Driven by
/// the host update loop; no suspension happens inside a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FreezeState {
    /// Ready to accept a respawn.
    Armed,
    /// Frozen; counting down to release.
    Waiting { ticks_remaining: u32 },
}

/// Checkpoint tracking plus post-respawn freeze.
///
/// Trigger volumes call [`Self::set_checkpoint`] as the vehicle passes
/// them; [`Self::respawn`] hands back the pose to teleport to and starts
/// the freeze countdown. The caller zeroes velocity and suspends its drive
/// controller while [`Self::is_frozen`] reports true.
#[derive(Debug)]
pub struct RespawnSystem {
    freeze_ticks: u32,
    checkpoint: Option<Pose>,
    state: FreezeState,
}

impl RespawnSystem {
    /// Creates a respawn system, optionally seeded with an initial spawn
    /// pose so a respawn is valid before the first checkpoint.
    #[must_use]
    pub fn new(freeze_ticks: u32, initial_spawn: Option<Pose>) -> Self {
        Self {
            freeze_ticks,
            checkpoint: initial_spawn,
            state: FreezeState::Armed,
        }
    }

    /// Records the most recently passed checkpoint.
    pub fn set_checkpoint(&mut self, pose: Pose) {
        debug!(x = pose.position.x, z = pose.position.z, "checkpoint saved");
        self.checkpoint = Some(pose);
    }

    /// The pose a respawn would teleport to, if any.
    #[must_use]
    pub fn checkpoint(&self) -> Option<Pose> {
        self.checkpoint
    }

    /// Requests a respawn at the last checkpoint.
    ///
    /// Returns the pose to teleport to, or `None` when rejected: a respawn
    /// while already frozen is an invariant guard (warned, no state
    /// change), and a respawn with no checkpoint recorded is a no-op.
    pub fn respawn(&mut self) -> Option<Pose> {
        if self.is_frozen() {
            warn!("respawn requested while already respawning");
            return None;
        }
        let Some(pose) = self.checkpoint else {
            warn!("no checkpoint to respawn at");
            return None;
        };
        if self.freeze_ticks > 0 {
            self.state = FreezeState::Waiting {
                ticks_remaining: self.freeze_ticks,
            };
        }
        debug!(ticks = self.freeze_ticks, "respawning at checkpoint");
        Some(pose)
    }

    /// Advances the freeze countdown by one simulation step.
    pub fn tick(&mut self) {
        if let FreezeState::Waiting { ticks_remaining } = &mut self.state {
            *ticks_remaining -= 1;
            if *ticks_remaining == 0 {
                self.state = FreezeState::Armed;
                debug!("respawn freeze released");
            }
        }
    }

    /// Whether the vehicle is currently frozen after a respawn.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        matches!(self.state, FreezeState::Waiting { .. })
    }
}
