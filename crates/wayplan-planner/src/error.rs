//! Error types for planning and trajectory assembly.
//!
//! Per-attempt IK non-convergence is deliberately NOT an error: it is
//! absorbed by the retry ladder and only surfaces here once a waypoint has
//! exhausted every tier.

use thiserror::Error;
use wayplan_urdf::UrdfError;

/// Errors from planner construction and sequential planning.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The robot model could not be loaded.
    #[error("model load failed: {0}")]
    Urdf(#[from] UrdfError),

    /// The requested end-effector link does not exist or is unreachable
    /// from the model root.
    #[error("end effector link not found: {0}")]
    UnknownEndEffector(String),

    /// The supplied configuration has the wrong dimension.
    #[error("configuration dimension mismatch: expected {expected}, got {got}")]
    DofMismatch { expected: usize, got: usize },

    /// A waypoint carries invalid tolerances.
    #[error("waypoint {index} is invalid: {reason}")]
    InvalidWaypoint { index: usize, reason: String },

    /// One waypoint exhausted the tight, relaxed, and random-restart tiers.
    /// Planning stops here; later waypoints are not attempted.
    #[error(
        "waypoint {index} unreachable after {attempts} attempts \
         (status {status}, violated: {violated:?})"
    )]
    WaypointUnreachable {
        index: usize,
        attempts: u32,
        status: i32,
        violated: Vec<String>,
    },
}

/// Errors from first-order-hold trajectory construction.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    /// The time-tag list length does not match the result entry count.
    #[error("time count {times} does not match configuration count {configurations}")]
    TimeCountMismatch { times: usize, configurations: usize },

    /// Fewer than two knots.
    #[error("a trajectory needs at least two knots, got {0}")]
    TooFewKnots(usize),

    /// Time tags must be strictly increasing.
    #[error("time tags must be strictly increasing (violated at index {index})")]
    NonIncreasingTimes { index: usize },

    /// A configuration's dimension differs from the first entry's.
    #[error("configuration {index} has dimension {got}, expected {expected}")]
    DimMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_error_display_messages() {
        let e = PlanError::UnknownEndEffector("tool0".into());
        assert_eq!(e.to_string(), "end effector link not found: tool0");

        let e = PlanError::DofMismatch {
            expected: 7,
            got: 6,
        };
        assert_eq!(
            e.to_string(),
            "configuration dimension mismatch: expected 7, got 6"
        );

        let e = PlanError::WaypointUnreachable {
            index: 2,
            attempts: 24,
            status: 2,
            violated: vec!["position_box".into()],
        };
        let msg = e.to_string();
        assert!(msg.contains("waypoint 2"));
        assert!(msg.contains("24 attempts"));
        assert!(msg.contains("position_box"));
    }

    #[test]
    fn plan_error_from_urdf() {
        let e: PlanError = UrdfError::NoRootLink.into();
        assert!(matches!(e, PlanError::Urdf(_)));
    }

    #[test]
    fn trajectory_error_display_messages() {
        let e = TrajectoryError::TimeCountMismatch {
            times: 3,
            configurations: 4,
        };
        assert_eq!(
            e.to_string(),
            "time count 3 does not match configuration count 4"
        );

        let e = TrajectoryError::NonIncreasingTimes { index: 1 };
        assert!(e.to_string().contains("index 1"));

        let e = TrajectoryError::TooFewKnots(1);
        assert!(e.to_string().contains("at least two"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn errors_are_send_sync() {
        assert_send_sync::<PlanError>();
        assert_send_sync::<TrajectoryError>();
    }
}
