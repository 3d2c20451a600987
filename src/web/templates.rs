use crate::orchestrator::ConvergenceOutcome;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

pub const UPLOAD_FORM: &str = r#"<!doctype html>
<title>Upload BA Document</title>
<h1>Upload BA Document (PDF only)</h1>
<form method=post enctype=multipart/form-data>
  <input type=file name=file accept=".pdf">
  <input type=submit value=Upload>
</form>
"#;

const RESULTS: &str = "results";

const RESULTS_TEMPLATE: &str = r#"<!doctype html>
<title>Test Cases</title>
<h2>Test Cases:</h2>
<pre>{{test_cases}}</pre>
<h2>Review:</h2>
<pre>{{review}}</pre>
<p>{{iterations}} iteration(s), {{#if accepted}}accepted by the reviewer{{else}}stopped at the iteration limit{{/if}}.</p>
<a href="/download" download>Download Test Cases CSV</a>
"#;

/// Page templates. Values are HTML-escaped on render.
pub fn templates() -> Result<Handlebars<'static>, TemplateError> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);
    hb.register_template_string(RESULTS, RESULTS_TEMPLATE)?;
    Ok(hb)
}

pub fn render_results(
    hb: &Handlebars<'static>,
    outcome: &ConvergenceOutcome,
) -> Result<String, RenderError> {
    hb.render(
        RESULTS,
        &json!({
            "test_cases": outcome.test_cases,
            "review": outcome.review,
            "iterations": outcome.iterations,
            "accepted": outcome.accepted,
        }),
    )
}
