//! Ordered planning results: one entry per solved waypoint, plus the seed.

/// One solved configuration with its time tag.
///
/// The planner tags entries with their waypoint index (`0.0, 1.0, …`);
/// callers supply real timestamps when assembling a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct IkResultEntry {
    /// Time tag, monotonically increasing across entries.
    pub time: f32,
    /// Joint-space configuration (dimension = model DOF).
    pub configuration: Vec<f32>,
}

/// Append-only, ordered result set of a sequential plan.
///
/// Entry 0 is always the caller-supplied current configuration; entries
/// `1..=N` correspond one-to-one with the solved waypoints, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IkResults {
    entries: Vec<IkResultEntry>,
}

impl IkResults {
    /// Start a result set from the caller's current configuration.
    pub(crate) fn with_seed(q_current: &[f32]) -> Self {
        Self {
            entries: vec![IkResultEntry {
                time: 0.0,
                configuration: q_current.to_vec(),
            }],
        }
    }

    /// Append a solved configuration, tagging it with its entry index.
    pub(crate) fn push(&mut self, configuration: Vec<f32>) {
        let time = self.entries.len() as f32;
        self.entries.push(IkResultEntry {
            time,
            configuration,
        });
    }

    /// Build a result set directly from configurations (index time tags).
    ///
    /// Useful for assembling trajectories from configurations that did not
    /// come out of a planning call.
    pub fn from_configurations<I>(configurations: I) -> Self
    where
        I: IntoIterator<Item = Vec<f32>>,
    {
        let entries = configurations
            .into_iter()
            .enumerate()
            .map(|(i, configuration)| IkResultEntry {
                time: i as f32,
                configuration,
            })
            .collect();
        Self { entries }
    }

    /// The ordered entries.
    pub fn entries(&self) -> &[IkResultEntry] {
        &self.entries
    }

    /// Number of entries (waypoint count + 1 after a successful plan).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over configurations in order.
    pub fn configurations(&self) -> impl Iterator<Item = &[f32]> {
        self.entries.iter().map(|e| e.configuration.as_slice())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
