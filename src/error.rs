use thiserror::Error;

/// Top-level error type for the raceline track-tooling core.
#[derive(Debug, Error)]
pub enum RacelineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Errors related to curve evaluation and sampling.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("sample count must be at least 2, got {0}")]
    InvalidSampleCount(usize),
}

/// Errors related to the scene-graph collaborator.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("template not found")]
    TemplateNotFound,

    #[error("material not found")]
    MaterialNotFound,
}

/// Errors related to waypoint navigation.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("no waypoints assigned")]
    NoWaypoints,

    #[error("reach distance must be positive, got {0}")]
    InvalidReachDistance(f64),
}

/// Errors related to barrier placement.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("no barrier template assigned")]
    MissingTemplate,

    #[error("curve is degenerate (zero length)")]
    DegenerateCurve,

    #[error("barrier spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    #[error("raycast distance must be positive when ground snapping, got {0}")]
    InvalidRaycastDistance(f64),
}

/// Convenience type alias for results using [`RacelineError`].
pub type Result<T> = std::result::Result<T, RacelineError>;
