use crate::claude::Usage;
use crate::orchestrator::policy::Verdict;
use serde::Serialize;

/// Final `(test_cases, review)` pair plus what it took to get there.
#[derive(Debug, Clone, Serialize)]
pub struct ConvergenceOutcome {
    pub test_cases: String,
    pub review: String,
    pub iterations: u32,
    pub accepted: bool,
    pub usage: Usage,
    pub cost_usd: f64,
}

/// Running totals for one pass through the convergence loop.
#[derive(Debug, Default)]
pub(crate) struct ConvergenceSession {
    iterations: u32,
    usage: Usage,
    cost_usd: f64,
}

impl ConvergenceSession {
    pub fn record(&mut self, usage: &Usage, cost: f64) {
        self.usage.add(usage);
        self.cost_usd += cost;
    }

    /// Tokens spent so far across every agent call.
    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn next_iteration(&mut self) -> u32 {
        self.iterations += 1;
        self.iterations
    }

    pub fn finish(self, test_cases: String, review: String, verdict: Verdict) -> ConvergenceOutcome {
        ConvergenceOutcome {
            test_cases,
            review,
            iterations: self.iterations,
            accepted: verdict == Verdict::Accepted,
            usage: self.usage,
            cost_usd: self.cost_usd,
        }
    }
}
