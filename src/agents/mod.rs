//! Test case creator and reviewer agents
//!
//! An agent is a role, a system instruction and a user instruction. The user
//! prompt sent to the generator is the instruction followed by the role's
//! template rendered from the shared [`Context`].

pub mod prompts;

use crate::claude::GenerationRequest;
use prompts::{build_creator_prompt, build_review_prompt};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Creator,
    Reviewer,
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentRole::Creator => f.write_str("creator"),
            AgentRole::Reviewer => f.write_str("reviewer"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub role: AgentRole,
    pub name: &'static str,
    pub instructions: &'static str,
    pub task: &'static str,
}

pub const TEST_CASE_CREATOR: Agent = Agent {
    role: AgentRole::Creator,
    name: "Test Case Creator",
    instructions: "Create detailed and comprehensive test cases based on the provided BA document and any feedback. Focus on covering all acceptance criteria, user flows, and potential edge cases.",
    task: "Create detailed test cases based on the BA document and any previous feedback.",
};

pub const TEST_CASE_REVIEWER: Agent = Agent {
    role: AgentRole::Reviewer,
    name: "Test Case Reviewer",
    instructions: "Review the test cases created by the Test Case Creator. Ensure they cover all acceptance criteria, are sufficiently detailed, and address potential edge cases. Provide specific feedback for improvements if needed.",
    task: "Review the test cases based on the BA document.",
};

impl Agent {
    pub fn request(&self, context: &Context) -> GenerationRequest {
        let template = match self.role {
            AgentRole::Creator => build_creator_prompt(context),
            AgentRole::Reviewer => build_review_prompt(context),
        };

        GenerationRequest {
            role: self.role,
            system: self.instructions.to_string(),
            prompt: format!("{}\n\n{}", self.task, template),
        }
    }
}

/// Named variables threaded through the convergence loop.
#[derive(Debug, Clone, Default)]
pub struct Context {
    ba_document: String,
    test_cases: Option<String>,
    feedback: Option<String>,
}

impl Context {
    pub fn new(ba_document: impl Into<String>) -> Self {
        Self {
            ba_document: ba_document.into(),
            test_cases: None,
            feedback: None,
        }
    }

    pub fn ba_document(&self) -> &str {
        &self.ba_document
    }

    pub fn test_cases(&self) -> Option<&str> {
        self.test_cases.as_deref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn set_test_cases(&mut self, test_cases: String) {
        self.test_cases = Some(test_cases);
    }

    pub fn set_feedback(&mut self, feedback: String) {
        self.feedback = Some(feedback);
    }

    /// Look a variable up by its template name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "ba_document" => Some(self.ba_document()),
            "test_cases" => self.test_cases(),
            "feedback" => self.feedback(),
            _ => None,
        }
    }
}
