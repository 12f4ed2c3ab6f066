//! Kinematic robot model for wayplan.
//!
//! Loads URDF files into a lean, kinematics-only [`RobotModel`]: links,
//! joints, origins, axes, and position limits. A waypoint planner never
//! touches geometry, inertia, or joint dynamics, so none of those are
//! modeled here.

pub mod error;
pub mod parser;
pub mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::UrdfError;
pub use parser::{parse_file, parse_string};
pub use types::{JointData, JointLimits, JointType, Origin, RobotModel};
