//! Advisory classification of submission failures.
//!
//! The backend's structured error stays the source of truth; these hints
//! only decorate the rendered output. Pattern coverage is best-effort and
//! an unrecognized message simply gets no hint.

/// Presentation-only label for a recognized rejection shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureHint {
    /// The session targets a different branch than the student's.
    BranchMismatch,
    /// The session targets a different semester than the student's.
    SemesterMismatch,
    /// The device's WiFi network was not accepted.
    NetworkRejected,
}

impl FailureHint {
    pub fn label(&self) -> &'static str {
        match self {
            FailureHint::BranchMismatch => "you are registered in a different branch",
            FailureHint::SemesterMismatch => "you are registered in a different semester",
            FailureHint::NetworkRejected => "your WiFi network was not accepted",
        }
    }
}

impl std::fmt::Display for FailureHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Match a failure message against known rejection shapes.
///
/// Never alters the message itself; logs carry the original text.
pub fn classify_failure(message: &str) -> Option<FailureHint> {
    let lowered = message.to_lowercase();

    if lowered.contains("branch") {
        Some(FailureHint::BranchMismatch)
    } else if lowered.contains("semester") {
        Some(FailureHint::SemesterMismatch)
    } else if lowered.contains("wifi") || lowered.contains("network") {
        Some(FailureHint::NetworkRejected)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_branch_mismatch() {
        let message = "Unauthorized access: This session is for CSE branch, but you are registered in ECE branch";
        assert_eq!(classify_failure(message), Some(FailureHint::BranchMismatch));
    }

    #[test]
    fn test_classify_semester_mismatch() {
        let message =
            "Unauthorized access: This session is for Semester 3, but you are in Semester 5";
        assert_eq!(
            classify_failure(message),
            Some(FailureHint::SemesterMismatch)
        );
    }

    #[test]
    fn test_classify_network_rejection() {
        assert_eq!(
            classify_failure("WiFi network not authorized for this location"),
            Some(FailureHint::NetworkRejected)
        );
    }

    #[test]
    fn test_unrecognized_messages_get_no_hint() {
        assert_eq!(classify_failure("Attendance already marked for this session"), None);
        assert_eq!(classify_failure("This session is no longer active"), None);
        assert_eq!(classify_failure("QR code has expired"), None);
        assert_eq!(classify_failure(""), None);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(
            classify_failure("BRANCH mismatch"),
            Some(FailureHint::BranchMismatch)
        );
    }

    #[test]
    fn test_hint_labels() {
        assert!(FailureHint::BranchMismatch.to_string().contains("branch"));
        assert!(FailureHint::SemesterMismatch.to_string().contains("semester"));
        assert!(FailureHint::NetworkRejected.to_string().contains("WiFi"));
    }
}
