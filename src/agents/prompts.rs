//! Prompt templates for the two agent roles
//!
//! Both builders are pure: the same [`Context`] always renders the same text.
//! Variables that are not set yet render as empty strings.

use super::Context;

/// Build the creator prompt from the BA document and any reviewer feedback.
pub fn build_creator_prompt(context: &Context) -> String {
    format!(
        r#"Based on the BA document and any feedback provided, create detailed test cases:

BA Document:
{ba_document}

Feedback (if any):
{feedback}

Test Cases:
[Your detailed test cases here, following the format from the previous version]
"#,
        ba_document = context.ba_document(),
        feedback = context.feedback().unwrap_or_default(),
    )
}

/// Build the reviewer prompt from the BA document and the current test cases.
///
/// The closing `Feedback for Rework` section is what the reviewer fills in
/// when it wants another creator pass.
pub fn build_review_prompt(context: &Context) -> String {
    format!(
        r#"Review of test cases based on the BA document:

BA Document:
{ba_document}

Test Cases:
{test_cases}

Review:
1. Coverage: [Assess the comprehensiveness of test cases]
2. Detail: [Evaluate the level of detail in each test case]
3. Scenarios: [Comment on the variety of scenarios covered]
4. Requirements: [Check alignment with BA document requirements]
5. Edge Cases: [Identify any missing or well-covered edge cases]
6. Improvement Suggestions: [Provide specific areas for improvement]
7. Clarity: [Evaluate the clarity and ease of understanding of test cases]

Overall Assessment:
[Determine if test cases are acceptable or need rework]

Feedback for Rework (if needed):
[Provide specific feedback for the test case creator to address]
"#,
        ba_document = context.ba_document(),
        test_cases = context.test_cases().unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_prompt_without_feedback() {
        let context = Context::new("Users can log in with email.");
        let prompt = build_creator_prompt(&context);

        assert!(prompt.contains("BA Document:\nUsers can log in with email.\n"));
        assert!(prompt.contains("Feedback (if any):\n\n\nTest Cases:"));
    }

    #[test]
    fn test_creator_prompt_carries_feedback() {
        let mut context = Context::new("Checkout");
        context.set_feedback("Add a coupon scenario".to_string());

        let prompt = build_creator_prompt(&context);
        assert!(prompt.contains("Feedback (if any):\nAdd a coupon scenario\n"));
    }

    #[test]
    fn test_review_prompt_embeds_test_cases() {
        let mut context = Context::new("Checkout");
        context.set_test_cases("TC1: pay by card".to_string());

        let prompt = build_review_prompt(&context);
        assert!(prompt.starts_with("Review of test cases based on the BA document:"));
        assert!(prompt.contains("Test Cases:\nTC1: pay by card\n"));
        assert!(prompt.contains("Feedback for Rework (if needed):"));
    }
}
