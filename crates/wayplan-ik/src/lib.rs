//! Single-shot inverse kinematics for wayplan.
//!
//! Provides forward kinematics, geometric Jacobian computation, and a
//! Damped Least Squares (Levenberg-Marquardt) solver that drives an
//! end effector into a tolerance region around a target pose while
//! biasing toward a nominal posture.
//!
//! # Architecture
//!
//! ```text
//! RobotModel ──► KinematicChain ──► DlsSolver + ConstraintSet ──► SolveOutcome
//! ```
//!
//! The [`KinematicChain`] is extracted from a
//! [`RobotModel`](wayplan_urdf::RobotModel) once, optionally anchored to the
//! world by a base transform. Each solve is a single shot: seed in, joint
//! configuration plus a status code out. Retry strategies live upstream, in
//! the planner that calls this crate.

pub mod chain;
pub mod constraint;
pub mod solver;

pub use chain::KinematicChain;
pub use constraint::{ConstraintSet, OrientationCone, PositionBox};
pub use solver::{DlsConfig, DlsSolver, SolveOutcome, SolveStatus};
