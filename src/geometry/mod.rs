pub mod curve;
pub mod sample;

pub use curve::{Arc, Curve, Polyline};
pub use sample::{sample_at, sample_uniform, CurveSample};
