//! First-order-hold trajectory over planned configurations.

use crate::error::TrajectoryError;
use crate::result::IkResults;

/// Piecewise-linear joint trajectory: exact at its knots, linear between
/// them, clamped outside its time span.
#[derive(Debug, Clone, PartialEq)]
pub struct JointTrajectory {
    times: Vec<f32>,
    knots: Vec<Vec<f32>>,
}

impl JointTrajectory {
    /// Build a first-order-hold trajectory pairing `times` with the
    /// configurations of `results`, one time per entry.
    ///
    /// Fails when the counts differ, there are fewer than two knots, the
    /// times are not strictly increasing, or configuration dimensions are
    /// inconsistent.
    pub fn first_order_hold(
        times: &[f32],
        results: &IkResults,
    ) -> Result<Self, TrajectoryError> {
        let entries = results.entries();
        if times.len() != entries.len() {
            return Err(TrajectoryError::TimeCountMismatch {
                times: times.len(),
                configurations: entries.len(),
            });
        }
        if entries.len() < 2 {
            return Err(TrajectoryError::TooFewKnots(entries.len()));
        }
        for (index, window) in times.windows(2).enumerate() {
            if window[1] <= window[0] {
                return Err(TrajectoryError::NonIncreasingTimes { index: index + 1 });
            }
        }

        let dof = entries[0].configuration.len();
        for (index, entry) in entries.iter().enumerate() {
            if entry.configuration.len() != dof {
                return Err(TrajectoryError::DimMismatch {
                    index,
                    expected: dof,
                    got: entry.configuration.len(),
                });
            }
        }

        Ok(Self {
            times: times.to_vec(),
            knots: entries.iter().map(|e| e.configuration.clone()).collect(),
        })
    }

    /// Evaluate the trajectory at `t`. Exact at knot times; clamped to the
    /// boundary knots outside the time span.
    pub fn sample(&self, t: f32) -> Vec<f32> {
        let last = self.times.len() - 1;
        if t <= self.times[0] {
            return self.knots[0].clone();
        }
        if t >= self.times[last] {
            return self.knots[last].clone();
        }

        let mut segment = last - 1;
        for (i, window) in self.times.windows(2).enumerate() {
            if t >= window[0] && t < window[1] {
                segment = i;
                break;
            }
        }

        let t0 = self.times[segment];
        let t1 = self.times[segment + 1];
        let alpha = (t - t0) / (t1 - t0);
        let a = &self.knots[segment];
        let b = &self.knots[segment + 1];
        a.iter()
            .zip(b.iter())
            .map(|(&qa, &qb)| qa + alpha * (qb - qa))
            .collect()
    }

    /// First knot time.
    pub fn start_time(&self) -> f32 {
        self.times[0]
    }

    /// Last knot time.
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Total time span.
    pub fn duration(&self) -> f32 {
        self.end_time() - self.start_time()
    }

    /// Configuration dimension.
    pub fn dof(&self) -> usize {
        self.knots[0].len()
    }

    /// Number of knots.
    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_point() -> IkResults {
        IkResults::from_configurations(vec![vec![0.0, 1.0], vec![1.0, 3.0]])
    }

    #[test]
    fn two_points_exact_at_knots_linear_between() {
        let traj = JointTrajectory::first_order_hold(&[0.0, 2.0], &two_point()).unwrap();

        assert_eq!(traj.sample(0.0), vec![0.0, 1.0]);
        assert_eq!(traj.sample(2.0), vec![1.0, 3.0]);

        let mid = traj.sample(1.0);
        assert_relative_eq!(mid[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(mid[1], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn sample_clamps_outside_span() {
        let traj = JointTrajectory::first_order_hold(&[0.0, 2.0], &two_point()).unwrap();
        assert_eq!(traj.sample(-1.0), vec![0.0, 1.0]);
        assert_eq!(traj.sample(5.0), vec![1.0, 3.0]);
    }

    #[test]
    fn multi_segment_interpolation() {
        let results = IkResults::from_configurations(vec![
            vec![0.0],
            vec![1.0],
            vec![-1.0],
        ]);
        let traj = JointTrajectory::first_order_hold(&[0.0, 1.0, 3.0], &results).unwrap();

        assert_eq!(traj.sample(1.0), vec![1.0]);
        let v = traj.sample(2.0);
        assert_relative_eq!(v[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn construction_is_idempotent() {
        let a = JointTrajectory::first_order_hold(&[0.0, 2.0], &two_point()).unwrap();
        let b = JointTrajectory::first_order_hold(&[0.0, 2.0], &two_point()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn count_mismatch_fails() {
        let err = JointTrajectory::first_order_hold(&[0.0, 1.0, 2.0], &two_point()).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::TimeCountMismatch {
                times: 3,
                configurations: 2
            }
        ));
    }

    #[test]
    fn too_few_knots_fails() {
        let one = IkResults::from_configurations(vec![vec![0.0]]);
        let err = JointTrajectory::first_order_hold(&[0.0], &one).unwrap_err();
        assert!(matches!(err, TrajectoryError::TooFewKnots(1)));
    }

    #[test]
    fn non_increasing_times_fail() {
        let err = JointTrajectory::first_order_hold(&[0.0, 0.0], &two_point()).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::NonIncreasingTimes { index: 1 }
        ));
    }

    #[test]
    fn dim_mismatch_fails() {
        let results =
            IkResults::from_configurations(vec![vec![0.0, 1.0], vec![1.0]]);
        let err = JointTrajectory::first_order_hold(&[0.0, 1.0], &results).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::DimMismatch {
                index: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn accessors() {
        let traj = JointTrajectory::first_order_hold(&[1.0, 4.0], &two_point()).unwrap();
        assert_relative_eq!(traj.start_time(), 1.0);
        assert_relative_eq!(traj.end_time(), 4.0);
        assert_relative_eq!(traj.duration(), 3.0);
        assert_eq!(traj.dof(), 2);
        assert_eq!(traj.knot_count(), 2);
    }
}
