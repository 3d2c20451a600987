use crate::agents::{Agent, Context, TEST_CASE_CREATOR, TEST_CASE_REVIEWER};
use crate::claude::{ClaudeError, Generation, Generator};
use crate::export::{CsvArtifact, ExportError};
use crate::orchestrator::policy::AcceptancePolicy;
use crate::orchestrator::session::{ConvergenceOutcome, ConvergenceSession};
use thiserror::Error;
use tracing::Instrument;

#[derive(Error, Debug)]
pub enum ConvergenceError {
    #[error("{role} generation failed: {source}")]
    Generation {
        role: &'static str,
        #[source]
        source: ClaudeError,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Alternate creator and reviewer passes over `ba_document` until the
/// reviewer accepts or the iteration budget runs out.
///
/// Every reviewer pass rewrites the CSV artifact from the test cases it just
/// reviewed, including passes whose review asks for rework. Errors are not
/// retried.
pub async fn orchestrate_agents(
    generator: &dyn Generator,
    artifact: &CsvArtifact,
    policy: &AcceptancePolicy,
    ba_document: &str,
) -> Result<ConvergenceOutcome, ConvergenceError> {
    let mut context = Context::new(ba_document);
    let mut session = ConvergenceSession::default();

    loop {
        let iteration = session.next_iteration();
        let span = tracing::info_span!("iteration", iteration, max = policy.max_iterations());

        let (test_cases, review) = async {
            let test_cases = run_agent(generator, &TEST_CASE_CREATOR, &context, &mut session).await?;
            context.set_test_cases(test_cases.clone());

            let review = review_test_cases(generator, artifact, &context, &mut session).await?;
            Ok::<_, ConvergenceError>((test_cases, review))
        }
        .instrument(span)
        .await?;

        let verdict = policy.judge(&review, iteration - 1);
        let usage = session.usage();
        tracing::info!(
            iteration,
            ?verdict,
            rework_requested = policy.requests_rework(&review),
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "review judged"
        );

        if verdict.is_final() {
            let outcome = session.finish(test_cases, review, verdict);
            tracing::info!(
                iterations = outcome.iterations,
                accepted = outcome.accepted,
                input_tokens = outcome.usage.input_tokens,
                output_tokens = outcome.usage.output_tokens,
                cost_usd = outcome.cost_usd,
                "convergence finished"
            );
            return Ok(outcome);
        }

        context.set_feedback(review);
    }
}

/// Reviewer pass. Persists the CSV for the reviewed test cases before
/// returning the review text.
async fn review_test_cases(
    generator: &dyn Generator,
    artifact: &CsvArtifact,
    context: &Context,
    session: &mut ConvergenceSession,
) -> Result<String, ConvergenceError> {
    let review = run_agent(generator, &TEST_CASE_REVIEWER, context, session).await?;
    artifact.write(context.test_cases().unwrap_or_default(), &review)?;
    Ok(review)
}

async fn run_agent(
    generator: &dyn Generator,
    agent: &Agent,
    context: &Context,
    session: &mut ConvergenceSession,
) -> Result<String, ConvergenceError> {
    let request = agent.request(context);
    let Generation { text, usage, cost } = generator
        .generate(request)
        .await
        .map_err(|source| ConvergenceError::Generation {
            role: agent.name,
            source,
        })?;

    tracing::debug!(
        agent = agent.name,
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        chars = text.len(),
        "agent responded"
    );
    session.record(&usage, cost);

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentRole;
    use crate::claude::{GenerationRequest, Usage};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const REWORK: &str = "Coverage is thin.\n\nFeedback for Rework:\n- add refund cases";
    const APPROVED: &str = "Overall Assessment: acceptable.";

    /// Replays scripted reviews and numbers the creator's test cases.
    struct ScriptedGenerator {
        reviews: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<GenerationRequest>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedGenerator {
        fn new(reviews: &[&str]) -> Self {
            Self {
                reviews: Mutex::new(reviews.iter().map(|r| r.to_string()).collect()),
                requests: Mutex::new(Vec::new()),
                fail_on_call: None,
            }
        }

        fn failing_on(mut self, call: usize) -> Self {
            self.fail_on_call = Some(call);
            self
        }

        fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn creator_calls(&self) -> usize {
            self.requests()
                .iter()
                .filter(|r| r.role == AgentRole::Creator)
                .count()
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(&self, request: GenerationRequest) -> Result<Generation, ClaudeError> {
            let call = {
                let mut requests = self.requests.lock().unwrap();
                requests.push(request.clone());
                requests.len()
            };

            if self.fail_on_call == Some(call) {
                return Err(ClaudeError::ApiError {
                    status: 500,
                    body: "boom".to_string(),
                });
            }

            let text = match request.role {
                AgentRole::Creator => format!(
                    "Here are the test cases.\n\nFormat: description, steps, result.\n\nCase from pass {}\n- step\nExpected Result: pass {} ok",
                    self.creator_calls(),
                    self.creator_calls()
                ),
                AgentRole::Reviewer => self
                    .reviews
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| APPROVED.to_string()),
            };

            Ok(Generation {
                text,
                usage: Usage {
                    input_tokens: 100,
                    output_tokens: 10,
                },
                cost: 0.5,
            })
        }
    }

    fn artifact(dir: &TempDir) -> CsvArtifact {
        CsvArtifact::new(dir.path().join("test_cases.csv"))
    }

    #[tokio::test]
    async fn test_accepted_review_stops_after_one_iteration() {
        let dir = TempDir::new().unwrap();
        let generator = ScriptedGenerator::new(&[APPROVED]);

        let outcome = orchestrate_agents(&generator, &artifact(&dir), &AcceptancePolicy::default(), "BA")
            .await
            .unwrap();

        assert_eq!(outcome.iterations, 1);
        assert!(outcome.accepted);
        assert_eq!(outcome.review, APPROVED);
        assert!(outcome.test_cases.contains("Case from pass 1"));
        assert_eq!(generator.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_rework_twice_then_accept_runs_three_iterations() {
        let dir = TempDir::new().unwrap();
        let generator = ScriptedGenerator::new(&[REWORK, REWORK, APPROVED]);

        let outcome = orchestrate_agents(&generator, &artifact(&dir), &AcceptancePolicy::new(3), "BA")
            .await
            .unwrap();

        assert_eq!(outcome.iterations, 3);
        assert!(outcome.accepted);
        assert_eq!(outcome.review, APPROVED);
        assert!(outcome.test_cases.contains("Case from pass 3"));
    }

    #[tokio::test]
    async fn test_cap_enforced_when_marker_always_present() {
        let dir = TempDir::new().unwrap();
        let generator = ScriptedGenerator::new(&[REWORK, REWORK, REWORK, REWORK]);

        let outcome = orchestrate_agents(&generator, &artifact(&dir), &AcceptancePolicy::new(3), "BA")
            .await
            .unwrap();

        assert_eq!(outcome.iterations, 3);
        assert!(!outcome.accepted);
        assert_eq!(outcome.review, REWORK);
        assert_eq!(generator.requests().len(), 6);
        assert_eq!(outcome.usage.input_tokens, 600);
        assert!((outcome.cost_usd - 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_review_feeds_next_creator_prompt() {
        let dir = TempDir::new().unwrap();
        let generator = ScriptedGenerator::new(&[REWORK, APPROVED]);

        orchestrate_agents(&generator, &artifact(&dir), &AcceptancePolicy::default(), "Refund policy")
            .await
            .unwrap();

        let requests = generator.requests();
        let roles: Vec<AgentRole> = requests.iter().map(|r| r.role).collect();
        assert_eq!(
            roles,
            vec![
                AgentRole::Creator,
                AgentRole::Reviewer,
                AgentRole::Creator,
                AgentRole::Reviewer
            ]
        );
        assert!(requests[0].prompt.contains("Refund policy"));
        assert!(!requests[0].prompt.contains("add refund cases"));
        assert!(requests[1].prompt.contains("Case from pass 1"));
        assert!(requests[2].prompt.contains("Feedback (if any):\nCoverage is thin."));
        assert!(requests[3].prompt.contains("Case from pass 2"));
    }

    #[tokio::test]
    async fn test_csv_written_on_every_review() {
        let dir = TempDir::new().unwrap();
        let artifact = artifact(&dir);
        let generator = ScriptedGenerator::new(&[REWORK]).failing_on(3);

        let result = orchestrate_agents(&generator, &artifact, &AcceptancePolicy::default(), "BA").await;

        assert!(matches!(
            result,
            Err(ConvergenceError::Generation {
                role: "Test Case Creator",
                ..
            })
        ));
        let csv = String::from_utf8(artifact.read().unwrap()).unwrap();
        assert!(csv.contains("TC_001,Case from pass 1,- step,pass 1 ok"));
    }

    #[tokio::test]
    async fn test_generation_error_stops_the_loop() {
        let dir = TempDir::new().unwrap();
        let artifact = artifact(&dir);
        let generator = ScriptedGenerator::new(&[]).failing_on(2);

        let err = orchestrate_agents(&generator, &artifact, &AcceptancePolicy::default(), "BA")
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Test Case Reviewer generation failed"));
        assert_eq!(generator.requests().len(), 2);
        assert!(matches!(artifact.read(), Err(ExportError::NotGenerated)));
    }
}
