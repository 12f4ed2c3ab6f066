//! Sequential Cartesian waypoint planner.
//!
//! Wraps a single-shot IK backend in a tiered retry strategy, turning a
//! brittle solver into a bounded-effort, high-success-rate planner. Each
//! waypoint gets three escalating tiers, stopping at the first success:
//!
//! 1. one tight attempt at the caller's tolerances, seeded and regularized
//!    by the previous solution;
//! 2. a few attempts with progressively widened tolerances (many failures
//!    are tight numerics, not true infeasibility);
//! 3. many attempts at the original tolerances from random seeds within
//!    joint limits (DLS is only locally convergent, and a poor seed can
//!    mask a reachable solution).
//!
//! Solutions chain: each becomes the seed and nominal posture of the next
//! waypoint, keeping consecutive configurations close. The fold carries an
//! explicit accumulator, so the planner stays re-entrant across planning
//! calls; only the restart RNG advances between calls.

use nalgebra::{Isometry3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use wayplan_ik::{ConstraintSet, SolveOutcome};
use wayplan_urdf::RobotModel;

use crate::backend::{ChainBackend, IkBackend};
use crate::config::{PlannerConfig, RetryConfig};
use crate::error::PlanError;
use crate::result::IkResults;
use crate::waypoint::CartesianWaypoint;

/// Default seed for the restart generator.
pub const DEFAULT_SEED: u64 = 1234;

/// Sequential waypoint planner over an IK backend.
pub struct WaypointPlanner<B = ChainBackend> {
    backend: B,
    retry: RetryConfig,
    rng: ChaCha8Rng,
}

impl<B: IkBackend> WaypointPlanner<B> {
    /// Wrap an existing backend with default retry budgets and seed.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            retry: RetryConfig::default(),
            rng: ChaCha8Rng::seed_from_u64(DEFAULT_SEED),
        }
    }

    /// Override the retry budgets.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Reseed the restart generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Apply a loaded [`PlannerConfig`] (seed + retry budgets).
    #[must_use]
    pub fn with_config(self, config: &PlannerConfig) -> Self {
        self.with_retry(config.retry.clone()).with_seed(config.seed)
    }

    /// Reset the restart generator for deterministic replay.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// The retry budgets in effect.
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Degrees of freedom of the configuration space.
    pub fn dof(&self) -> usize {
        self.backend.dof()
    }

    /// One solve attempt for a single waypoint: builds the position box
    /// (always) and orientation cone (if the waypoint asks for it) at the
    /// given tolerances and delegates to the backend. The outcome is
    /// forwarded unchanged; status codes are not reinterpreted here.
    pub fn solve_waypoint(
        &self,
        waypoint: &CartesianWaypoint,
        q_seed: &[f32],
        q_nom: &[f32],
        position_tolerance: Vector3<f32>,
        rotation_tolerance: f32,
    ) -> SolveOutcome {
        let constraints = if waypoint.constrain_orientation {
            ConstraintSet::pose(&waypoint.pose, position_tolerance, rotation_tolerance)
        } else {
            ConstraintSet::position_only(waypoint.pose.translation.vector, position_tolerance)
        };
        self.backend.solve(&constraints, q_seed, q_nom)
    }

    /// Solve every waypoint in order, chaining each solution into the next
    /// attempt. Entry 0 of the result is `q_current`; entries `1..=N`
    /// correspond to the waypoints.
    ///
    /// Fails fast: the first waypoint to exhaust its retry budget aborts
    /// the plan with [`PlanError::WaypointUnreachable`] and no partial
    /// result is returned.
    pub fn plan_sequence(
        &mut self,
        waypoints: &[CartesianWaypoint],
        q_current: &[f32],
    ) -> Result<IkResults, PlanError> {
        let dof = self.backend.dof();
        if q_current.len() != dof {
            return Err(PlanError::DofMismatch {
                expected: dof,
                got: q_current.len(),
            });
        }
        for (index, waypoint) in waypoints.iter().enumerate() {
            waypoint
                .validate()
                .map_err(|reason| PlanError::InvalidWaypoint { index, reason })?;
        }

        let mut results = IkResults::with_seed(q_current);
        let mut previous = q_current.to_vec();

        for (index, waypoint) in waypoints.iter().enumerate() {
            let solution = self.solve_with_retries(index, waypoint, &previous)?;
            results.push(solution.clone());
            previous = solution;
        }

        Ok(results)
    }

    /// Run the three attempt tiers for one waypoint.
    fn solve_with_retries(
        &mut self,
        index: usize,
        waypoint: &CartesianWaypoint,
        previous: &[f32],
    ) -> Result<Vec<f32>, PlanError> {
        let pos_tol = waypoint.position_tolerance;
        let rot_tol = waypoint.rotation_tolerance;

        // Tier 1: tight attempt, seeded and regularized by the previous
        // solution.
        let mut last = self.solve_waypoint(waypoint, previous, previous, pos_tol, rot_tol);
        let mut attempts = 1;
        if last.is_converged() {
            return Ok(last.joint_positions);
        }

        // Tier 2: widen both tolerances by factor^k, same seed and nominal.
        for k in 1..=self.retry.relaxed_attempts {
            let scale = self.retry.relaxation_factor.powi(k as i32);
            debug!(waypoint = index, attempt = k, scale, "relaxing tolerances");
            last = self.solve_waypoint(
                waypoint,
                previous,
                previous,
                pos_tol * scale,
                rot_tol * scale,
            );
            attempts += 1;
            if last.is_converged() {
                return Ok(last.joint_positions);
            }
        }

        // Tier 3: original tolerances, random seeds within joint limits.
        // The nominal stays at the previous solution to keep the objective
        // biased toward continuity.
        for k in 0..self.retry.random_restarts {
            let q_seed = self.random_config();
            debug!(waypoint = index, restart = k, "retrying from random seed");
            last = self.solve_waypoint(waypoint, &q_seed, previous, pos_tol, rot_tol);
            attempts += 1;
            if last.is_converged() {
                return Ok(last.joint_positions);
            }
        }

        Err(PlanError::WaypointUnreachable {
            index,
            attempts,
            status: last.status.code(),
            violated: last.infeasible_constraints,
        })
    }

    /// Draw a uniform-random configuration within the joint limits.
    fn random_config(&mut self) -> Vec<f32> {
        let limits = self.backend.joint_limits();
        limits
            .iter()
            .map(|&(lower, upper)| {
                if upper > lower {
                    self.rng.gen_range(lower..=upper)
                } else {
                    lower
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// URDF-backed construction
// ---------------------------------------------------------------------------

impl WaypointPlanner<ChainBackend> {
    /// Load a model from a URDF file and resolve the end effector.
    pub fn from_urdf_file(
        path: impl AsRef<std::path::Path>,
        ee_link: &str,
        base_to_world: Isometry3<f32>,
    ) -> Result<Self, PlanError> {
        let model = wayplan_urdf::parse_file(path)?;
        Self::from_model(model, ee_link, base_to_world)
    }

    /// Build from an already-parsed model.
    pub fn from_model(
        model: RobotModel,
        ee_link: &str,
        base_to_world: Isometry3<f32>,
    ) -> Result<Self, PlanError> {
        Ok(Self::with_backend(ChainBackend::new(
            model,
            ee_link,
            base_to_world,
        )?))
    }

    /// Re-resolve the end effector by link name; affects all subsequent
    /// planning calls.
    pub fn set_end_effector(&mut self, ee_link: &str) -> Result<(), PlanError> {
        self.backend.set_end_effector(ee_link)
    }

    /// The owned robot model.
    pub fn model(&self) -> &RobotModel {
        self.backend.model()
    }

    /// The current end-effector link name.
    pub fn end_effector(&self) -> &str {
        self.backend.end_effector()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
