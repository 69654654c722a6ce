pub mod error;
pub mod geometry;
pub mod math;
pub mod navigation;
pub mod placement;
pub mod respawn;
pub mod scene;

pub use error::{RacelineError, Result};
