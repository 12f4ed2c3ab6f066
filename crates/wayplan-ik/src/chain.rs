//! Kinematic chain extracted from a URDF [`RobotModel`].
//!
//! A [`KinematicChain`] is an ordered list of joints from the base link to
//! the end-effector link. It stores the static transforms (origins), joint
//! axes, and position limits needed for forward kinematics and Jacobian
//! computation, plus an optional base-to-world transform so all poses this
//! chain reports are world-frame.

use nalgebra::{Isometry3, Matrix3, Translation3, UnitQuaternion, UnitVector3, Vector3};

use wayplan_urdf::{JointType, Origin, RobotModel};

/// A single joint in the kinematic chain.
#[derive(Debug, Clone)]
pub struct ChainJoint {
    /// Name of this joint (from URDF).
    pub name: String,
    /// Static transform from parent link frame to this joint frame.
    pub origin: Isometry3<f32>,
    /// Joint axis in the joint's local frame.
    pub axis: UnitVector3<f32>,
    /// Whether this is a prismatic joint (false = revolute).
    pub is_prismatic: bool,
    /// Lower position limit (rad or m).
    pub lower_limit: f32,
    /// Upper position limit (rad or m).
    pub upper_limit: f32,
}

/// An ordered kinematic chain from base to end-effector.
///
/// Built from a [`RobotModel`] by tracing the joint tree from root to a
/// specified end-effector link. Only actuated joints (revolute, continuous,
/// prismatic) are included; fixed joints have their transforms folded into
/// the next actuated joint's origin. Unbounded joints get `±π` limits so
/// restart sampling always has a finite range to draw from.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    /// Ordered joints from base to end-effector.
    joints: Vec<ChainJoint>,
    /// Transform from the last joint's child link to the end-effector frame.
    /// Accounts for any trailing fixed joints.
    ee_offset: Isometry3<f32>,
    /// Robot-base-to-world transform (X_WB). Identity unless set.
    base: Isometry3<f32>,
}

impl KinematicChain {
    /// Build a kinematic chain from a [`RobotModel`].
    ///
    /// Traces from the model's root link to `ee_link`, collecting actuated
    /// joints. Fixed joints are folded into the accumulated transform.
    ///
    /// Returns `None` if `ee_link` is not reachable from the root link.
    pub fn from_model(model: &RobotModel, ee_link: &str) -> Option<Self> {
        let path = find_path_to_link(model, &model.root_link, ee_link)?;

        let mut joints = Vec::new();
        let mut accumulated_fixed = Isometry3::identity();

        for joint_name in &path {
            let joint = model.joint(joint_name).ok()?;
            let joint_origin = origin_to_isometry(&joint.origin);

            if joint.joint_type.is_actuated() {
                // Compose any accumulated fixed transforms with this joint's origin
                let combined_origin = accumulated_fixed * joint_origin;
                accumulated_fixed = Isometry3::identity();

                let axis = Vector3::new(joint.axis[0], joint.axis[1], joint.axis[2]);
                let axis = UnitVector3::new_normalize(axis);

                let (lower, upper) = match joint.joint_type {
                    JointType::Continuous => (-std::f32::consts::PI, std::f32::consts::PI),
                    _ => (
                        joint.limits.lower.unwrap_or(-std::f32::consts::PI),
                        joint.limits.upper.unwrap_or(std::f32::consts::PI),
                    ),
                };

                joints.push(ChainJoint {
                    name: joint.name.clone(),
                    origin: combined_origin,
                    axis,
                    is_prismatic: joint.joint_type == JointType::Prismatic,
                    lower_limit: lower,
                    upper_limit: upper,
                });
            } else {
                // Fixed joint: accumulate its transform
                accumulated_fixed *= joint_origin;
            }
        }

        Some(Self {
            joints,
            ee_offset: accumulated_fixed,
            base: Isometry3::identity(),
        })
    }

    /// Anchor the chain's base link to the world with transform `X_WB`.
    ///
    /// All subsequent forward kinematics and Jacobians are world-frame.
    #[must_use]
    pub fn with_base_transform(mut self, base_to_world: Isometry3<f32>) -> Self {
        self.base = base_to_world;
        self
    }

    /// The robot-base-to-world transform.
    pub fn base_transform(&self) -> &Isometry3<f32> {
        &self.base
    }

    /// Number of actuated degrees of freedom.
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    /// Joint names in chain order.
    pub fn joint_names(&self) -> Vec<&str> {
        self.joints.iter().map(|j| j.name.as_str()).collect()
    }

    /// Access the joint definitions.
    pub fn joints(&self) -> &[ChainJoint] {
        &self.joints
    }

    /// Lower position limits in chain order.
    pub fn lower_limits(&self) -> Vec<f32> {
        self.joints.iter().map(|j| j.lower_limit).collect()
    }

    /// Upper position limits in chain order.
    pub fn upper_limits(&self) -> Vec<f32> {
        self.joints.iter().map(|j| j.upper_limit).collect()
    }

    /// Compute forward kinematics: joint positions -> end-effector pose.
    ///
    /// Returns the end-effector pose in the world frame (base frame when no
    /// base transform was set).
    ///
    /// # Panics
    ///
    /// Panics if `q.len() != self.dof()`.
    pub fn forward_kinematics(&self, q: &[f32]) -> Isometry3<f32> {
        assert_eq!(q.len(), self.dof(), "q.len() must equal chain DOF");

        let mut transform = self.base;
        for (joint, &position) in self.joints.iter().zip(q.iter()) {
            // Apply static origin transform
            transform *= joint.origin;
            // Apply joint motion
            transform *= joint_transform(&joint.axis, joint.is_prismatic, position);
        }
        // Apply trailing fixed-joint offset
        transform * self.ee_offset
    }

    /// Compute per-joint frames for Jacobian computation.
    ///
    /// Returns (joint_origins_in_world, joint_axes_in_world, ee_position).
    pub fn joint_frames(&self, q: &[f32]) -> (Vec<Vector3<f32>>, Vec<Vector3<f32>>, Vector3<f32>) {
        assert_eq!(q.len(), self.dof());

        let mut transform = self.base;
        let mut origins = Vec::with_capacity(self.dof());
        let mut axes = Vec::with_capacity(self.dof());

        for (joint, &position) in self.joints.iter().zip(q.iter()) {
            transform *= joint.origin;

            // Record joint origin and axis in world frame BEFORE joint motion
            origins.push(transform.translation.vector);
            axes.push(transform.rotation * joint.axis.into_inner());

            transform *= joint_transform(&joint.axis, joint.is_prismatic, position);
        }

        let ee_transform = transform * self.ee_offset;
        let ee_pos = ee_transform.translation.vector;

        (origins, axes, ee_pos)
    }

    /// Clamp joint positions to their limits.
    pub fn clamp_joints(&self, q: &mut [f32]) {
        for (i, joint) in self.joints.iter().enumerate() {
            q[i] = q[i].clamp(joint.lower_limit, joint.upper_limit);
        }
    }
}

/// Convert a URDF [`Origin`] (xyz + rpy) to an [`Isometry3`].
fn origin_to_isometry(origin: &Origin) -> Isometry3<f32> {
    let translation = Translation3::new(origin.xyz[0], origin.xyz[1], origin.xyz[2]);
    let rotation = UnitQuaternion::from_matrix(&rotation_matrix_from_rpy(
        origin.rpy[0],
        origin.rpy[1],
        origin.rpy[2],
    ));
    Isometry3::from_parts(translation, rotation)
}

/// Build a rotation matrix from roll-pitch-yaw (intrinsic XYZ / extrinsic ZYX).
fn rotation_matrix_from_rpy(roll: f32, pitch: f32, yaw: f32) -> Matrix3<f32> {
    let (sr, cr) = roll.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();

    // Extrinsic ZYX = Intrinsic XYZ
    Matrix3::new(
        cy * cp,
        cy * sp * sr - sy * cr,
        cy * sp * cr + sy * sr,
        sy * cp,
        sy * sp * sr + cy * cr,
        sy * sp * cr - cy * sr,
        -sp,
        cp * sr,
        cp * cr,
    )
}

/// Compute the transform for a single joint at a given position.
fn joint_transform(
    axis: &UnitVector3<f32>,
    is_prismatic: bool,
    position: f32,
) -> Isometry3<f32> {
    if is_prismatic {
        Isometry3::from_parts(
            Translation3::from(axis.into_inner() * position),
            UnitQuaternion::identity(),
        )
    } else {
        Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(axis, position),
        )
    }
}

/// Find the ordered list of joint names from `root` to `target_link`.
fn find_path_to_link(model: &RobotModel, root: &str, target: &str) -> Option<Vec<String>> {
    if root == target {
        return Some(Vec::new());
    }

    for joint in model.joints.values() {
        if joint.parent == root {
            if joint.child == target {
                return Some(vec![joint.name.clone()]);
            }
            if let Some(mut path) = find_path_to_link(model, &joint.child, target) {
                path.insert(0, joint.name.clone());
                return Some(path);
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
