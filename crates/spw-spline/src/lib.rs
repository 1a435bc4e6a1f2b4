//! SplineWalk geometry: piecewise cubic Bezier splines and sampling.

pub mod bezier;
pub mod curve;
pub mod sample;
pub mod spline;
pub mod tangent;

pub use curve::Curve;
pub use spline::BezierSpline;
pub use tangent::TangentMode;
