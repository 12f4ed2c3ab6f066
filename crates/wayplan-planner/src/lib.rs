//! Sequential Cartesian waypoint planning for wayplan robots.
//!
//! Takes an ordered list of Cartesian waypoints and a current joint
//! configuration, and produces one feasible configuration per waypoint,
//! each continuous in configuration space with its predecessor. The
//! single-shot solver underneath is brittle (locally convergent and
//! sensitive to the initial guess), so every waypoint is wrapped in a
//! tiered retry: tight attempt, progressive tolerance relaxation, then random
//! restarts within joint limits.
//!
//! # Architecture
//!
//! ```text
//! CartesianWaypoint[] ──► WaypointPlanner ──► IkResults ──► JointTrajectory
//!                              │
//!                              ▼ (IkBackend)
//!                      ChainBackend: KinematicChain + DlsSolver
//! ```
//!
//! The planner owns its model, chain, and restart RNG exclusively; run
//! concurrent plans on separate planner instances.
//!
//! # Example
//!
//! ```no_run
//! use nalgebra::Isometry3;
//! use wayplan_planner::{CartesianWaypoint, JointTrajectory, WaypointPlanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut planner =
//!     WaypointPlanner::from_urdf_file("arm.urdf", "end_effector", Isometry3::identity())?;
//!
//! let waypoints = vec![
//!     CartesianWaypoint::at(Isometry3::translation(0.3, 0.0, 0.5)),
//!     CartesianWaypoint::at(Isometry3::translation(0.0, 0.3, 0.5)),
//! ];
//! let q_current = vec![0.0; planner.dof()];
//!
//! let results = planner.plan_sequence(&waypoints, &q_current)?;
//! let trajectory = JointTrajectory::first_order_hold(&[0.0, 1.0, 2.0], &results)?;
//! let q_mid = trajectory.sample(0.5);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod planner;
pub mod result;
pub mod trajectory;
pub mod waypoint;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use backend::{ChainBackend, IkBackend};
pub use config::{ConfigError, PlannerConfig, RetryConfig};
pub use error::{PlanError, TrajectoryError};
pub use planner::{WaypointPlanner, DEFAULT_SEED};
pub use result::{IkResultEntry, IkResults};
pub use trajectory::JointTrajectory;
pub use waypoint::CartesianWaypoint;
