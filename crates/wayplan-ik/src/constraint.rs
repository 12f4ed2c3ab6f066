//! Geometric constraints on an end-effector pose.
//!
//! A [`ConstraintSet`] is the solver's input vocabulary: a [`PositionBox`]
//! that is always present and an [`OrientationCone`] that is optional.
//! Constraints carry stable names so a failed solve can report which of
//! them the final configuration still violates.

use nalgebra::{Isometry3, UnitQuaternion, Vector3};

// ---------------------------------------------------------------------------
// PositionBox
// ---------------------------------------------------------------------------

/// Axis-aligned box around a target position, world frame.
///
/// A position `p` satisfies the constraint when `|p - target|` is within
/// `half_widths` on every axis.
#[derive(Debug, Clone)]
pub struct PositionBox {
    /// Box center: the desired end-effector position.
    pub target: Vector3<f32>,
    /// Per-axis half-widths of the feasible region.
    pub half_widths: Vector3<f32>,
}

impl PositionBox {
    /// Stable name reported in violation lists.
    pub const NAME: &'static str = "position_box";

    /// Create a box constraint centered on `target`.
    pub const fn new(target: Vector3<f32>, half_widths: Vector3<f32>) -> Self {
        Self {
            target,
            half_widths,
        }
    }

    /// Whether `position` lies inside the box.
    pub fn contains(&self, position: &Vector3<f32>) -> bool {
        let d = position - self.target;
        d.x.abs() <= self.half_widths.x
            && d.y.abs() <= self.half_widths.y
            && d.z.abs() <= self.half_widths.z
    }

    /// Vector from `position` to the box center.
    pub fn center_error(&self, position: &Vector3<f32>) -> Vector3<f32> {
        self.target - position
    }
}

// ---------------------------------------------------------------------------
// OrientationCone
// ---------------------------------------------------------------------------

/// Maximum angular deviation from a target orientation.
#[derive(Debug, Clone)]
pub struct OrientationCone {
    /// Desired end-effector orientation, world frame.
    pub target: UnitQuaternion<f32>,
    /// Maximum allowed angle (radians) between achieved and desired.
    pub max_angle: f32,
}

impl OrientationCone {
    /// Stable name reported in violation lists.
    pub const NAME: &'static str = "orientation_cone";

    /// Create a cone constraint around `target`.
    pub const fn new(target: UnitQuaternion<f32>, max_angle: f32) -> Self {
        Self { target, max_angle }
    }

    /// Angle (radians) between `rotation` and the target orientation.
    pub fn angle_to(&self, rotation: &UnitQuaternion<f32>) -> f32 {
        (self.target * rotation.inverse()).angle()
    }

    /// Whether `rotation` lies inside the cone.
    pub fn contains(&self, rotation: &UnitQuaternion<f32>) -> bool {
        self.angle_to(rotation) <= self.max_angle
    }
}

// ---------------------------------------------------------------------------
// ConstraintSet
// ---------------------------------------------------------------------------

/// The full constraint set for one solve: position always, orientation
/// only when the caller asks for it.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    pub position: PositionBox,
    pub orientation: Option<OrientationCone>,
}

impl ConstraintSet {
    /// Position-only constraints.
    pub const fn position_only(target: Vector3<f32>, half_widths: Vector3<f32>) -> Self {
        Self {
            position: PositionBox::new(target, half_widths),
            orientation: None,
        }
    }

    /// Position and orientation constraints from a full target pose.
    pub fn pose(target: &Isometry3<f32>, half_widths: Vector3<f32>, max_angle: f32) -> Self {
        Self {
            position: PositionBox::new(target.translation.vector, half_widths),
            orientation: Some(OrientationCone::new(target.rotation, max_angle)),
        }
    }

    /// Whether orientation is constrained at all.
    pub const fn constrains_orientation(&self) -> bool {
        self.orientation.is_some()
    }

    /// Whether `pose` satisfies every constraint in the set.
    pub fn satisfied(&self, pose: &Isometry3<f32>) -> bool {
        if !self.position.contains(&pose.translation.vector) {
            return false;
        }
        match &self.orientation {
            Some(cone) => cone.contains(&pose.rotation),
            None => true,
        }
    }

    /// Names of the constraints `pose` violates, in declaration order.
    pub fn violated_names(&self, pose: &Isometry3<f32>) -> Vec<String> {
        let mut names = Vec::new();
        if !self.position.contains(&pose.translation.vector) {
            names.push(PositionBox::NAME.to_string());
        }
        if let Some(cone) = &self.orientation {
            if !cone.contains(&pose.rotation) {
                names.push(OrientationCone::NAME.to_string());
            }
        }
        names
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn position_box_contains() {
        let b = PositionBox::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.1, 0.1, 0.1));
        assert!(b.contains(&Vector3::new(1.05, 0.0, 0.0)));
        assert!(b.contains(&Vector3::new(0.9, -0.1, 0.1)));
        assert!(!b.contains(&Vector3::new(1.2, 0.0, 0.0)));
        assert!(!b.contains(&Vector3::new(1.0, 0.0, 0.11)));
    }

    #[test]
    fn position_box_center_error() {
        let b = PositionBox::new(Vector3::new(1.0, 2.0, 3.0), Vector3::zeros());
        let e = b.center_error(&Vector3::new(0.5, 2.0, 3.5));
        assert_relative_eq!(e.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(e.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(e.z, -0.5, epsilon = 1e-6);
    }

    #[test]
    fn orientation_cone_angle() {
        let target = UnitQuaternion::identity();
        let cone = OrientationCone::new(target, 0.1);
        let rot = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        assert_relative_eq!(cone.angle_to(&rot), FRAC_PI_2, epsilon = 1e-5);
        assert!(!cone.contains(&rot));
        assert!(cone.contains(&UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            0.05
        )));
    }

    #[test]
    fn set_satisfied_position_only() {
        let set = ConstraintSet::position_only(Vector3::zeros(), Vector3::new(0.01, 0.01, 0.01));
        // Any orientation is fine when unconstrained
        let pose = Isometry3::from_parts(
            nalgebra::Translation3::new(0.005, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1.0),
        );
        assert!(set.satisfied(&pose));
    }

    #[test]
    fn set_violated_names_in_order() {
        let target = Isometry3::identity();
        let set = ConstraintSet::pose(&target, Vector3::new(0.01, 0.01, 0.01), 0.05);

        let bad_both = Isometry3::from_parts(
            nalgebra::Translation3::new(1.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.0),
        );
        assert_eq!(
            set.violated_names(&bad_both),
            vec!["position_box", "orientation_cone"]
        );

        let bad_rot_only = Isometry3::from_parts(
            nalgebra::Translation3::new(0.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.0),
        );
        assert_eq!(set.violated_names(&bad_rot_only), vec!["orientation_cone"]);

        assert!(set.violated_names(&Isometry3::identity()).is_empty());
    }
}
