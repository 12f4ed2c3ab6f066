//! Damped Least Squares (Levenberg-Marquardt) single-shot IK solver.
//!
//! Iteratively drives the end effector into the feasible region of a
//! [`ConstraintSet`], using the geometric Jacobian and DLS pseudoinverse
//! for the task step and a nullspace term that pulls the configuration
//! toward a nominal posture. The solver is single-shot: one seed in, one
//! outcome out. It never retries; that is the caller's job.

use nalgebra::{DMatrix, DVector, Isometry3, UnitQuaternion, Vector3};

use crate::chain::KinematicChain;
use crate::constraint::ConstraintSet;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the DLS solver.
#[derive(Debug, Clone)]
pub struct DlsConfig {
    /// Maximum solver iterations.
    pub max_iterations: u32,
    /// Damping factor (lambda). Higher = more robust near singularities,
    /// but slower convergence.
    pub damping: f32,
    /// Per-iteration nullspace gain pulling the configuration toward the
    /// nominal posture. Zero disables the posture bias.
    pub nominal_gain: f32,
}

impl Default for DlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 150,
            damping: 0.01,
            nominal_gain: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// Status / outcome
// ---------------------------------------------------------------------------

/// Numeric status of a solve: code 1 is the converged range, everything
/// above is a failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SolveStatus {
    /// All constraints satisfied.
    Converged = 1,
    /// Hit the iteration cap with constraints still violated.
    IterationLimit = 2,
    /// The damped normal equations became singular.
    Singular = 3,
    /// A joint update produced a non-finite value.
    Diverged = 4,
}

impl SolveStatus {
    /// Numeric info code.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Whether this status falls in the converged range.
    pub const fn is_converged(self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Result of a single-shot solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Solved joint positions (best effort on failure).
    pub joint_positions: Vec<f32>,
    /// Solver status code.
    pub status: SolveStatus,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final distance to the box center (meters).
    pub position_error: f32,
    /// Final angle to the target orientation (radians). Zero when
    /// orientation is unconstrained.
    pub orientation_error: f32,
    /// Names of constraints still violated. Empty on convergence.
    pub infeasible_constraints: Vec<String>,
}

impl SolveOutcome {
    /// Whether the solve converged.
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Damped Least Squares IK solver with nominal-posture bias.
#[derive(Debug, Clone)]
pub struct DlsSolver {
    config: DlsConfig,
}

impl DlsSolver {
    /// Create a new solver with the given configuration.
    pub const fn new(config: DlsConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DlsConfig::default())
    }

    /// Access the solver configuration.
    pub const fn config(&self) -> &DlsConfig {
        &self.config
    }

    /// Solve for a configuration inside the constraint set's feasible region.
    ///
    /// `q_seed` is the starting configuration; `q_nom` is the posture the
    /// redundant degrees of freedom are biased toward.
    ///
    /// # Panics
    ///
    /// Panics if `q_seed` or `q_nom` length differs from the chain DOF.
    pub fn solve(
        &self,
        chain: &KinematicChain,
        constraints: &ConstraintSet,
        q_seed: &[f32],
        q_nom: &[f32],
    ) -> SolveOutcome {
        assert_eq!(q_seed.len(), chain.dof());
        assert_eq!(q_nom.len(), chain.dof());

        let mut q: Vec<f32> = q_seed.to_vec();
        let n = chain.dof();
        let rows = if constraints.constrains_orientation() {
            6
        } else {
            3
        };

        for iteration in 0..self.config.max_iterations {
            let ee_pose = chain.forward_kinematics(&q);
            if constraints.satisfied(&ee_pose) {
                return self.finish(SolveStatus::Converged, q, &ee_pose, constraints, iteration);
            }

            let error_vec = compute_error(&ee_pose, constraints);
            let jacobian = compute_jacobian(chain, &q, rows);
            let m = jacobian.nrows();

            // DLS: dq = J^T (J J^T + lambda^2 I)^{-1} * error
            let jjt = &jacobian * jacobian.transpose();
            let damped =
                jjt + DMatrix::identity(m, m) * (self.config.damping * self.config.damping);
            let Some(damped_inv) = damped.try_inverse() else {
                let pose = chain.forward_kinematics(&q);
                return self.finish(SolveStatus::Singular, q, &pose, constraints, iteration);
            };

            let jt_dinv = jacobian.transpose() * damped_inv;
            let dq_task = &jt_dinv * &error_vec;

            // Nullspace posture bias: project the pull toward q_nom onto
            // directions that do not disturb the task step.
            let nullspace = DMatrix::identity(n, n) - &jt_dinv * &jacobian;
            let posture =
                DVector::from_fn(n, |i, _| self.config.nominal_gain * (q_nom[i] - q[i]));
            let dq = dq_task + nullspace * posture;

            for i in 0..n {
                q[i] += dq[i];
            }

            if q.iter().any(|v| !v.is_finite()) {
                // Restore a usable configuration for diagnostics
                let q_prev: Vec<f32> = (0..n).map(|i| (q[i] - dq[i]).clamp(-1e6, 1e6)).collect();
                let pose = chain.forward_kinematics(&q_prev);
                return self.finish(SolveStatus::Diverged, q_prev, &pose, constraints, iteration);
            }

            // Clamp to joint limits
            chain.clamp_joints(&mut q);
        }

        let pose = chain.forward_kinematics(&q);
        self.finish(
            SolveStatus::IterationLimit,
            q,
            &pose,
            constraints,
            self.config.max_iterations,
        )
    }

    fn finish(
        &self,
        status: SolveStatus,
        q: Vec<f32>,
        pose: &Isometry3<f32>,
        constraints: &ConstraintSet,
        iterations: u32,
    ) -> SolveOutcome {
        let position_error = constraints
            .position
            .center_error(&pose.translation.vector)
            .norm();
        let orientation_error = constraints
            .orientation
            .as_ref()
            .map_or(0.0, |cone| cone.angle_to(&pose.rotation));
        let infeasible_constraints = if status.is_converged() {
            Vec::new()
        } else {
            constraints.violated_names(pose)
        };

        SolveOutcome {
            joint_positions: q,
            status,
            iterations,
            position_error,
            orientation_error,
            infeasible_constraints,
        }
    }
}

// ---------------------------------------------------------------------------
// Error and Jacobian computation
// ---------------------------------------------------------------------------

/// Error vector from the current EE pose toward the constraint targets.
///
/// 3 rows when only position is constrained, 6 (linear + angular) otherwise.
fn compute_error(ee_pose: &Isometry3<f32>, constraints: &ConstraintSet) -> DVector<f32> {
    let pos_err = constraints
        .position
        .center_error(&ee_pose.translation.vector);

    match &constraints.orientation {
        None => DVector::from_column_slice(&[pos_err.x, pos_err.y, pos_err.z]),
        Some(cone) => {
            // Orientation error as axis-angle
            let rot_err = cone.target * ee_pose.rotation.inverse();
            let ori_err = orientation_error(&rot_err);
            DVector::from_column_slice(&[
                pos_err.x, pos_err.y, pos_err.z, ori_err.x, ori_err.y, ori_err.z,
            ])
        }
    }
}

/// Extract orientation error as a 3-vector (axis * angle) from a unit quaternion.
fn orientation_error(q: &UnitQuaternion<f32>) -> Vector3<f32> {
    if let Some(axis) = q.axis() {
        axis.into_inner() * q.angle()
    } else {
        Vector3::zeros()
    }
}

/// Compute the geometric Jacobian for the current configuration.
///
/// Returns a 3xN matrix for position-only constraints, 6xN (linear +
/// angular rows) when orientation is constrained.
fn compute_jacobian(chain: &KinematicChain, q: &[f32], rows: usize) -> DMatrix<f32> {
    let n = chain.dof();
    let (origins, axes, ee_pos) = chain.joint_frames(q);

    let mut jacobian = DMatrix::zeros(rows, n);

    for i in 0..n {
        let joint = &chain.joints()[i];
        let z_i = &axes[i]; // joint axis in world frame
        let o_i = &origins[i]; // joint origin in world frame

        if joint.is_prismatic {
            // Linear velocity: z_i; angular rows stay zero
            jacobian[(0, i)] = z_i.x;
            jacobian[(1, i)] = z_i.y;
            jacobian[(2, i)] = z_i.z;
        } else {
            // Revolute: linear velocity z_i x (ee_pos - o_i)
            let r = ee_pos - o_i;
            let cross = z_i.cross(&r);
            jacobian[(0, i)] = cross.x;
            jacobian[(1, i)] = cross.y;
            jacobian[(2, i)] = cross.z;

            if rows == 6 {
                // Angular velocity: z_i
                jacobian[(3, i)] = z_i.x;
                jacobian[(4, i)] = z_i.y;
                jacobian[(5, i)] = z_i.z;
            }
        }
    }

    jacobian
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
