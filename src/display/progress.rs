//! Progress display for the validation phases

/// Prints `[i/n] phase` as each phase of a fixed run starts
pub struct ProgressTracker {
    phases: &'static [&'static str],
    started: usize,
}

impl ProgressTracker {
    pub fn new(phases: &'static [&'static str]) -> Self {
        Self { phases, started: 0 }
    }

    /// Announce the next phase; None once every phase has started
    pub fn next_step(&mut self) -> Option<&'static str> {
        let phase = *self.phases.get(self.started)?;
        self.started += 1;
        println!("{}", step_line(self.started, self.phases.len(), phase));
        Some(phase)
    }
}

pub fn step_line(position: usize, total: usize, phase: &str) -> String {
    format!("[{}/{}] {}", position, total, phase)
}

/// Types of operation status
#[derive(Debug, Clone)]
pub enum OperationStatus {
    Success,
    Warning,
    Error,
}

pub fn status_line(operation: &str, status: &OperationStatus) -> String {
    let symbol = match status {
        OperationStatus::Success => "✅",
        OperationStatus::Warning => "⚠️",
        OperationStatus::Error => "❌",
    };
    // Leading space keeps emoji from being clipped by some terminals
    format!(" {} {}", symbol, operation)
}

pub fn display_status(operation: &str, status: OperationStatus) {
    println!("{}", status_line(operation, &status));
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [&str; 2] = ["Connecting", "Validating"];

    #[test]
    fn test_phases_start_in_order_then_stop() {
        let mut tracker = ProgressTracker::new(&PHASES);

        assert_eq!(tracker.next_step(), Some("Connecting"));
        assert_eq!(tracker.next_step(), Some("Validating"));
        assert_eq!(tracker.next_step(), None);
    }

    #[test]
    fn test_no_phases() {
        assert_eq!(ProgressTracker::new(&[]).next_step(), None);
    }

    #[test]
    fn test_step_line() {
        assert_eq!(step_line(2, 4, "Enumerating explores"), "[2/4] Enumerating explores");
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line("All explores passed", &OperationStatus::Success),
            " ✅ All explores passed"
        );
        assert!(status_line("x", &OperationStatus::Error).contains("❌"));
    }
}
