//! Turns one submission outcome into replacement content for the output
//! surface.

use pulldown_cmark::{html, Event, Options, Parser};
use shared::protocol::ReviewResult;

use crate::RequestOutcome;

pub fn render(outcome: &RequestOutcome) -> String {
    match outcome {
        RequestOutcome::Success(result) => render_success(result),
        RequestOutcome::Failure(message) => {
            format!(r#"<div class="error">{}</div>"#, escape_html(message))
        }
    }
}

fn render_success(result: &ReviewResult) -> String {
    let mut out = String::new();
    if let Some(score) = result.score {
        out.push_str(&format!(
            r#"<div class="score-box">Code Quality Score: {score:.2} / 1.00</div>"#
        ));
    }
    // The review section is always present, even for an empty review.
    out.push_str(r#"<div class="review-content"><h2>Review Comments</h2>"#);
    out.push_str(&markdown_to_html(&result.review));
    out.push_str("</div>");
    if !result.suggested_fix.trim().is_empty() {
        out.push_str(r#"<div class="fix-content"><h2>Suggested Fix</h2>"#);
        out.push_str(&markdown_to_html(&result.suggested_fix));
        out.push_str("</div>");
    }
    out
}

/// Markdown to HTML with raw HTML in the source escaped rather than passed
/// through, so model output cannot smuggle markup into the page.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
