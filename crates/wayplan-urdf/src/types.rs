//! Core data types for the in-memory kinematic model.
//!
//! These types are the crate's canonical representation of a robot's
//! kinematic tree, independent of the XML parsing layer. Only what a
//! planner consumes survives: joint topology, origins, axes, and position
//! limits. Links carry no payload beyond their name.

use std::collections::HashMap;

use crate::error::UrdfError;

// ---------------------------------------------------------------------------
// JointType
// ---------------------------------------------------------------------------

/// URDF joint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    /// Rotation about a single axis, with position limits.
    Revolute,
    /// Unlimited rotation about a single axis.
    Continuous,
    /// Translation along an axis, with position limits.
    Prismatic,
    /// No relative motion between parent and child.
    Fixed,
    /// Unconstrained 6-DOF joint (rarely used).
    Floating,
    /// Translation along one axis with no rotation (rarely used).
    Planar,
}

impl JointType {
    /// Whether this joint type has actuatable degrees of freedom.
    pub const fn is_actuated(self) -> bool {
        matches!(self, Self::Revolute | Self::Continuous | Self::Prismatic)
    }
}

// ---------------------------------------------------------------------------
// JointLimits
// ---------------------------------------------------------------------------

/// Position bounds on a joint's motion.
#[derive(Debug, Clone, Default)]
pub struct JointLimits {
    /// Lower position limit (rad or m). `None` means unbounded.
    pub lower: Option<f32>,
    /// Upper position limit (rad or m). `None` means unbounded.
    pub upper: Option<f32>,
}

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// A 3D pose specified as position + roll-pitch-yaw.
#[derive(Debug, Clone)]
pub struct Origin {
    /// Translation `[x, y, z]` in meters.
    pub xyz: [f32; 3],
    /// Rotation `[roll, pitch, yaw]` in radians.
    pub rpy: [f32; 3],
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            xyz: [0.0; 3],
            rpy: [0.0; 3],
        }
    }
}

// ---------------------------------------------------------------------------
// JointData
// ---------------------------------------------------------------------------

/// In-memory representation of a URDF joint.
#[derive(Debug, Clone)]
pub struct JointData {
    /// Joint name.
    pub name: String,
    /// Joint type.
    pub joint_type: JointType,
    /// Parent link name.
    pub parent: String,
    /// Child link name.
    pub child: String,
    /// Joint origin relative to parent link.
    pub origin: Origin,
    /// Joint axis (unit vector, default `[0, 0, 1]`).
    pub axis: [f32; 3],
    /// Position limits.
    pub limits: JointLimits,
}

// ---------------------------------------------------------------------------
// RobotModel
// ---------------------------------------------------------------------------

/// Complete in-memory kinematic tree of a robot.
///
/// Constructed by the parser and consumed by chain extraction. Holds the
/// link name set, all joints keyed by name, and the root link.
#[derive(Debug, Clone)]
pub struct RobotModel {
    /// Robot name.
    pub name: String,
    /// Names of all links.
    pub links: Vec<String>,
    /// All joints, keyed by name.
    pub joints: HashMap<String, JointData>,
    /// Name of the root link (the one never referenced as a child).
    pub root_link: String,
}

impl RobotModel {
    /// Whether a link with this name exists.
    pub fn has_link(&self, name: &str) -> bool {
        self.links.iter().any(|l| l == name)
    }

    /// Get a joint by name.
    pub fn joint(&self, name: &str) -> Result<&JointData, UrdfError> {
        self.joints
            .get(name)
            .ok_or_else(|| UrdfError::MissingJoint(name.into()))
    }

    /// Iterate over actuatable joints (revolute, continuous, prismatic).
    pub fn actuated_joints(&self) -> impl Iterator<Item = &JointData> {
        self.joints.values().filter(|j| j.joint_type.is_actuated())
    }

    /// Number of actuatable degrees of freedom.
    pub fn dof(&self) -> usize {
        self.actuated_joints().count()
    }

    /// Names of actuated joints, sorted alphabetically.
    pub fn actuated_joint_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actuated_joints().map(|j| j.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
