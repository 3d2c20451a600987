/// Literal text a reviewer writes when it wants another creator pass.
pub const REWORK_MARKER: &str = "Feedback for Rework";

pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Accept a review iff it does not contain the rework marker, or the
/// iteration budget is spent.
///
/// Matching is a case-sensitive substring search. A review that merely
/// mentions the marker phrase counts as a rework request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptancePolicy {
    max_iterations: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The review carried no rework marker.
    Accepted,
    /// Rework was requested but the iteration budget is exhausted.
    BudgetExhausted,
    /// Run another creator/reviewer pass with the review as feedback.
    Rework,
}

impl Verdict {
    pub fn is_final(&self) -> bool {
        !matches!(self, Verdict::Rework)
    }
}

impl AcceptancePolicy {
    /// `max_iterations` below 1 is raised to 1: the loop always runs once.
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
        }
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn requests_rework(&self, review: &str) -> bool {
        review.contains(REWORK_MARKER)
    }

    /// Judge the review produced on zero-based `iteration`.
    pub fn judge(&self, review: &str, iteration: u32) -> Verdict {
        if !self.requests_rework(review) {
            Verdict::Accepted
        } else if iteration + 1 >= self.max_iterations {
            Verdict::BudgetExhausted
        } else {
            Verdict::Rework
        }
    }
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}
