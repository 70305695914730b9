//! Worker lifecycle state.

use std::fmt;

/// Lifecycle state of a worker generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkerState {
    /// Created, install not yet started.
    #[default]
    Parsed,
    /// Install handler running (seeding).
    Installing,
    /// Seeded, waiting to activate.
    Installed,
    /// Activate handler running (retiring old generations).
    Activating,
    /// Controlling clients and arbitrating fetches.
    Activated,
    /// Failed or replaced.
    Redundant,
}

impl WorkerState {
    /// Whether fetches are intercepted in this state.
    pub fn can_intercept_fetch(&self) -> bool {
        matches!(self, WorkerState::Activated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerState::Parsed => "parsed",
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if a state transition is valid
pub fn is_valid_transition(from: WorkerState, to: WorkerState) -> bool {
    use WorkerState::*;

    matches!(
        (from, to),
        (Parsed, Installing)
            | (Installing, Installed)
            | (Installing, Redundant)
            | (Installed, Activating)
            | (Activating, Activated)
            | (Activating, Redundant)
            | (Activated, Redundant)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use WorkerState::*;

    #[test]
    fn test_full_lifecycle_is_valid() {
        let path = [Parsed, Installing, Installed, Activating, Activated, Redundant];
        for pair in path.windows(2) {
            assert!(is_valid_transition(pair[0], pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_cannot_skip_install() {
        assert!(!is_valid_transition(Parsed, Activating));
        assert!(!is_valid_transition(Parsed, Activated));
        assert!(!is_valid_transition(Installing, Activating));
    }

    #[test]
    fn test_redundant_is_terminal() {
        for to in [Parsed, Installing, Installed, Activating, Activated, Redundant] {
            assert!(!is_valid_transition(Redundant, to));
        }
    }

    #[test]
    fn test_only_activated_intercepts() {
        assert!(Activated.can_intercept_fetch());
        for state in [Parsed, Installing, Installed, Activating, Redundant] {
            assert!(!state.can_intercept_fetch());
        }
    }
}
