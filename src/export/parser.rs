//! Test case text to table rows
//!
//! The creator's output is free text. Rows are recovered with a fixed-offset
//! heuristic: paragraphs are separated by a blank line, the first two
//! paragraphs are preamble, and every later paragraph is one test case.

use serde::Serialize;

const PREAMBLE_SEGMENTS: usize = 2;
const STEP_PREFIX: &str = "-";
const EXPECTED_PREFIX: &str = "Expected Result:";
const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestCaseRow {
    pub id: String,
    pub description: String,
    pub steps: String,
    pub expected_result: String,
}

/// Parse generated test case text into rows with sequential `TC_###` ids.
pub fn parse_test_cases(test_cases: &str) -> Vec<TestCaseRow> {
    test_cases
        .split("\n\n")
        .skip(PREAMBLE_SEGMENTS)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| parse_segment(index + 1, segment))
        .collect()
}

fn parse_segment(number: usize, segment: &str) -> TestCaseRow {
    let lines: Vec<&str> = segment.split('\n').collect();

    let description = lines.first().map(|l| l.trim()).unwrap_or_default();

    let steps = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| l.starts_with(STEP_PREFIX))
        .collect::<Vec<_>>()
        .join("\n");

    let expected_result = lines
        .iter()
        .find(|l| l.trim().starts_with(EXPECTED_PREFIX))
        .map(|l| l.replace(EXPECTED_PREFIX, "").trim().to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    TestCaseRow {
        id: format!("TC_{:03}", number),
        description: description.to_string(),
        steps,
        expected_result,
    }
}
