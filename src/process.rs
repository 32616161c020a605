//! Termination statuses of external commands run on behalf of the host.
//!
//! Spawning itself happens outside this crate: a collaborator executes the
//! command and reports the captured standard output together with the raw
//! wait status of the child. This module only consumes that pair.

use std::cmp::Ordering;
use std::sync::Mutex;

use super::comparable::Comparable;

mod constants {
    /// Shift extracting the logical exit code from the high byte of a raw
    /// wait status after a normal termination.
    pub const EXIT_CODE_SHIFT: u32 = 8;
}

static LAST_STATUS: Mutex<Option<ExitStatus>> = Mutex::new(None);

/// The termination status of a completed child process.
///
/// The value keeps two views of one immutable integer: the raw wait status
/// as reported by the process-reaping primitive, and the logical exit code
/// derived from its high byte. Comparisons against plain integers use the
/// RAW encoding on purpose: a child exiting with code 10 equals `2560` and
/// does NOT equal `10`, while code 0 coincides with `0` in both views.
#[derive(Clone, Copy, Debug, Hash)]
pub struct ExitStatus {
    raw: i32,
}

impl ExitStatus {
    /// Wraps the raw wait status reported by the process-reaping primitive.
    pub const fn from_raw(raw: i32) -> Self {
        ExitStatus { raw }
    }

    /// The logical exit code of a normal termination.
    pub const fn exit_code(&self) -> i32 {
        self.raw >> constants::EXIT_CODE_SHIFT
    }

    /// The unmodified wait status. This is the raw encoding, not the exit code.
    pub const fn to_raw(&self) -> i32 {
        self.raw
    }

    /// Checks whether the child terminated normally with exit code zero.
    pub fn success(&self) -> bool {
        self.exit_code() == 0
    }
}

impl Comparable<i32> for ExitStatus {
    fn compare(&self, other: &i32) -> Option<Ordering> {
        Some(self.raw.cmp(other))
    }
}

impl Comparable for ExitStatus {
    fn compare(&self, other: &ExitStatus) -> Option<Ordering> {
        Comparable::<i32>::compare(self, &other.raw)
    }
}

impl PartialEq for ExitStatus {
    fn eq(&self, other: &ExitStatus) -> bool {
        matches!(
            Comparable::<ExitStatus>::compare(self, other),
            Some(Ordering::Equal)
        )
    }
}

impl Eq for ExitStatus {}

impl PartialEq<i32> for ExitStatus {
    fn eq(&self, other: &i32) -> bool {
        matches!(Comparable::<i32>::compare(self, other), Some(Ordering::Equal))
    }
}

impl PartialOrd<i32> for ExitStatus {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        Comparable::<i32>::compare(self, other)
    }
}

/// The captured result of one external command, as handed over by the
/// spawning collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutcome {
    stdout: Vec<u8>,
    status: ExitStatus,
}

impl CommandOutcome {
    /// Stores the pair reported by the collaborator and publishes the
    /// termination status as the process-wide last status.
    pub fn record(stdout: Vec<u8>, raw_status: i32) -> Self {
        let status = ExitStatus::from_raw(raw_status);
        set_last_status(status);
        CommandOutcome { stdout, status }
    }

    /// The bytes the command printed to its standard output.
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    /// The termination status of the command.
    pub fn status(&self) -> ExitStatus {
        self.status
    }
}

/// Publishes `status` as the status of the most recently completed command.
///
/// The slot is process-wide and overwritten on every completed command; with
/// concurrent callers the last writer wins.
pub fn set_last_status(status: ExitStatus) {
    *LAST_STATUS.lock().expect("Last status lock poisoned") = Some(status);
}

/// The status of the most recently completed command, if any ran yet.
pub fn last_status() -> Option<ExitStatus> {
    *LAST_STATUS.lock().expect("Last status lock poisoned")
}

#[cfg(test)]
mod tests {
    use crate::comparable::Comparable;

    use super::{CommandOutcome, ExitStatus};

    #[test]
    fn test_dual_encoding() {
        let status = ExitStatus::from_raw(2560);
        assert_eq!(status.exit_code(), 10);
        assert_eq!(status.to_raw(), 2560);
        assert!(status == 2560);
        assert!(status != 10);
        assert!(!status.success());
    }

    #[test]
    fn test_zero_coincides() {
        let status = ExitStatus::from_raw(0);
        assert_eq!(status.exit_code(), 0);
        assert_eq!(status.to_raw(), 0);
        assert!(status == 0);
        assert!(status.success());
    }

    #[test]
    fn test_ordering_uses_raw_value() {
        let status = ExitStatus::from_raw(2560);
        assert!(status.is_greater(&10).unwrap());
        assert!(status.is_less(&4000).unwrap());
        assert!(status.is_equal(&2560).unwrap());
        assert!(status > 10);
        assert!(status < 4000);
    }

    #[test]
    fn test_status_equality() {
        assert_eq!(ExitStatus::from_raw(2560), ExitStatus::from_raw(2560));
        assert_ne!(ExitStatus::from_raw(2560), ExitStatus::from_raw(0));
    }

    #[test]
    fn test_outcome_publishes_last_status() {
        let outcome = CommandOutcome::record(b"foo\n".to_vec(), 0);
        assert_eq!(outcome.stdout(), b"foo\n");
        assert!(outcome.status().success());
        let last = super::last_status().expect("No last status recorded");
        assert!(last == 0);

        CommandOutcome::record(Vec::new(), 2560);
        let last = super::last_status().expect("No last status recorded");
        assert_eq!(last.exit_code(), 10);
    }
}
