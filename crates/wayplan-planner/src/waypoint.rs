//! Cartesian waypoint: a desired end-effector pose plus tolerance envelope.

use nalgebra::{Isometry3, Vector3};

/// One step of a Cartesian trajectory: the desired end-effector pose and
/// how precisely it must be reached.
///
/// Defaults match the usual manipulation envelope: a 5 mm position box per
/// axis, a 0.05 rad orientation cone, orientation unconstrained.
#[derive(Debug, Clone)]
pub struct CartesianWaypoint {
    /// Desired end-effector pose in the world frame.
    pub pose: Isometry3<f32>,
    /// Per-axis half-widths of the feasible position box (meters).
    pub position_tolerance: Vector3<f32>,
    /// Max angle (radians) between solved and desired orientation. Ignored
    /// unless `constrain_orientation` is set.
    pub rotation_tolerance: f32,
    /// Whether the orientation constraint is enabled.
    pub constrain_orientation: bool,
}

impl Default for CartesianWaypoint {
    fn default() -> Self {
        Self {
            pose: Isometry3::identity(),
            position_tolerance: Vector3::new(0.005, 0.005, 0.005),
            rotation_tolerance: 0.05,
            constrain_orientation: false,
        }
    }
}

impl CartesianWaypoint {
    /// Waypoint at `pose` with default tolerances, orientation free.
    pub fn at(pose: Isometry3<f32>) -> Self {
        Self {
            pose,
            ..Self::default()
        }
    }

    /// Override the per-axis position tolerance.
    #[must_use]
    pub fn with_position_tolerance(mut self, half_widths: Vector3<f32>) -> Self {
        self.position_tolerance = half_widths;
        self
    }

    /// Enable the orientation constraint with the given cone angle.
    #[must_use]
    pub fn with_orientation_constraint(mut self, max_angle: f32) -> Self {
        self.rotation_tolerance = max_angle;
        self.constrain_orientation = true;
        self
    }

    /// Check the tolerance invariants: non-negative and finite. The
    /// rotation tolerance is only checked when orientation is constrained.
    pub(crate) fn validate(&self) -> Result<(), String> {
        for (axis, v) in ["x", "y", "z"].iter().zip(self.position_tolerance.iter()) {
            if !v.is_finite() || *v < 0.0 {
                return Err(format!("position tolerance {axis} = {v}"));
            }
        }
        if self.constrain_orientation
            && (!self.rotation_tolerance.is_finite() || self.rotation_tolerance < 0.0)
        {
            return Err(format!("rotation tolerance = {}", self.rotation_tolerance));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_waypoint() {
        let wp = CartesianWaypoint::default();
        assert_eq!(wp.pose, Isometry3::identity());
        assert_relative_eq!(wp.position_tolerance.x, 0.005);
        assert_relative_eq!(wp.rotation_tolerance, 0.05);
        assert!(!wp.constrain_orientation);
        assert!(wp.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let pose = Isometry3::translation(0.3, 0.0, 0.5);
        let wp = CartesianWaypoint::at(pose)
            .with_position_tolerance(Vector3::new(0.01, 0.01, 0.02))
            .with_orientation_constraint(0.1);
        assert_eq!(wp.pose, pose);
        assert_relative_eq!(wp.position_tolerance.z, 0.02);
        assert!(wp.constrain_orientation);
        assert_relative_eq!(wp.rotation_tolerance, 0.1);
    }

    #[test]
    fn validate_rejects_negative_position_tolerance() {
        let wp = CartesianWaypoint::default()
            .with_position_tolerance(Vector3::new(0.005, -0.001, 0.005));
        let reason = wp.validate().unwrap_err();
        assert!(reason.contains("position tolerance y"));
    }

    #[test]
    fn validate_ignores_rotation_tolerance_when_unconstrained() {
        let mut wp = CartesianWaypoint::default();
        wp.rotation_tolerance = -1.0;
        assert!(wp.validate().is_ok());

        wp.constrain_orientation = true;
        assert!(wp.validate().is_err());
    }
}
