pub mod curve;
pub mod curve2;
pub mod surface;

pub use curve::{Arc, Circle, Curve3, CurveKind, Ellipse, NurbsCurve3, Segment};
pub use curve2::{Arc2, Curve2, Curve2Kind, NurbsCurve2, Segment2};
pub use surface::{Cone, Cylinder, NurbsSurface, Plane, Sphere, Surface, SurfaceKind, Torus};
