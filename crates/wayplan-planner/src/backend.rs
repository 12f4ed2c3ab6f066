//! The solver capability the planner retries over.
//!
//! [`IkBackend`] is the narrow seam between the retry/chaining logic and
//! the numerical machinery: forward kinematics, joint limits, and a
//! single-shot constrained solve. The production backend wraps a
//! [`KinematicChain`] and [`DlsSolver`]; tests substitute a scripted stub.

use nalgebra::Isometry3;

use wayplan_ik::{ConstraintSet, DlsConfig, DlsSolver, KinematicChain, SolveOutcome};
use wayplan_urdf::RobotModel;

use crate::error::PlanError;

/// Abstract single-shot IK capability.
pub trait IkBackend {
    /// Degrees of freedom of the configuration space.
    fn dof(&self) -> usize;

    /// Per-joint (lower, upper) position limits, chain order.
    fn joint_limits(&self) -> Vec<(f32, f32)>;

    /// End-effector pose for a configuration, world frame.
    fn forward_kinematics(&self, q: &[f32]) -> Isometry3<f32>;

    /// One solve attempt: seed in, outcome out. No retries.
    fn solve(&self, constraints: &ConstraintSet, q_seed: &[f32], q_nom: &[f32]) -> SolveOutcome;
}

// ---------------------------------------------------------------------------
// ChainBackend
// ---------------------------------------------------------------------------

/// Production backend: a kinematic chain plus the DLS solver.
///
/// Owns the robot model so the end effector can be re-resolved by link
/// name after construction.
#[derive(Debug)]
pub struct ChainBackend {
    model: RobotModel,
    chain: KinematicChain,
    ee_link: String,
    solver: DlsSolver,
}

impl ChainBackend {
    /// Build a backend for `model` with the end effector at `ee_link`,
    /// anchored to the world by `base_to_world`.
    pub fn new(
        model: RobotModel,
        ee_link: &str,
        base_to_world: Isometry3<f32>,
    ) -> Result<Self, PlanError> {
        let chain = KinematicChain::from_model(&model, ee_link)
            .ok_or_else(|| PlanError::UnknownEndEffector(ee_link.to_string()))?
            .with_base_transform(base_to_world);
        Ok(Self {
            model,
            chain,
            ee_link: ee_link.to_string(),
            solver: DlsSolver::with_defaults(),
        })
    }

    /// Override the single-shot solver configuration.
    #[must_use]
    pub fn with_solver_config(mut self, config: DlsConfig) -> Self {
        self.solver = DlsSolver::new(config);
        self
    }

    /// Re-resolve the end effector by link name. The base transform is
    /// preserved. On error the previous chain stays in place.
    pub fn set_end_effector(&mut self, ee_link: &str) -> Result<(), PlanError> {
        let base = *self.chain.base_transform();
        let chain = KinematicChain::from_model(&self.model, ee_link)
            .ok_or_else(|| PlanError::UnknownEndEffector(ee_link.to_string()))?
            .with_base_transform(base);
        self.chain = chain;
        self.ee_link = ee_link.to_string();
        Ok(())
    }

    /// The owned robot model.
    pub fn model(&self) -> &RobotModel {
        &self.model
    }

    /// The current end-effector link name.
    pub fn end_effector(&self) -> &str {
        &self.ee_link
    }

    /// The extracted kinematic chain.
    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }
}

impl IkBackend for ChainBackend {
    fn dof(&self) -> usize {
        self.chain.dof()
    }

    fn joint_limits(&self) -> Vec<(f32, f32)> {
        self.chain
            .lower_limits()
            .into_iter()
            .zip(self.chain.upper_limits())
            .collect()
    }

    fn forward_kinematics(&self, q: &[f32]) -> Isometry3<f32> {
        self.chain.forward_kinematics(q)
    }

    fn solve(&self, constraints: &ConstraintSet, q_seed: &[f32], q_nom: &[f32]) -> SolveOutcome {
        self.solver.solve(&self.chain, constraints, q_seed, q_nom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wayplan_test_utils::TWO_LINK_ARM_URDF;
    use wayplan_urdf::parse_string;

    fn backend() -> ChainBackend {
        let model = parse_string(TWO_LINK_ARM_URDF).unwrap();
        ChainBackend::new(model, "end_effector", Isometry3::identity()).unwrap()
    }

    #[test]
    fn backend_dof_and_limits() {
        let b = backend();
        assert_eq!(b.dof(), 2);
        assert_eq!(b.joint_limits(), vec![(-2.617, 2.617), (-2.094, 2.094)]);
    }

    #[test]
    fn unknown_end_effector_fails() {
        let model = parse_string(TWO_LINK_ARM_URDF).unwrap();
        let err = ChainBackend::new(model, "gripper", Isometry3::identity()).unwrap_err();
        assert!(matches!(err, PlanError::UnknownEndEffector(name) if name == "gripper"));
    }

    #[test]
    fn set_end_effector_rebuilds_chain() {
        let mut b = backend();
        b.set_end_effector("forearm").unwrap();
        assert_eq!(b.end_effector(), "forearm");
        assert_eq!(b.dof(), 2);

        // Failed switch leaves the previous chain intact
        assert!(b.set_end_effector("gripper").is_err());
        assert_eq!(b.end_effector(), "forearm");
    }

    #[test]
    fn set_end_effector_preserves_base_transform() {
        let model = parse_string(TWO_LINK_ARM_URDF).unwrap();
        let base = Isometry3::translation(0.0, 0.0, 1.0);
        let mut b = ChainBackend::new(model, "end_effector", base).unwrap();
        b.set_end_effector("forearm").unwrap();

        let ee = b.forward_kinematics(&[0.0, 0.0]);
        // base 1.0 + shoulder 0.05 + elbow 0.3
        assert!((ee.translation.z - 1.35).abs() < 1e-5);
    }
}
