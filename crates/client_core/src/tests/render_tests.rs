use super::*;
use shared::protocol::ReviewResult;

fn success(review: &str, fix: &str, score: Option<f64>) -> RequestOutcome {
    RequestOutcome::Success(ReviewResult {
        review: review.to_string(),
        suggested_fix: fix.to_string(),
        score,
    })
}

#[test]
fn score_banner_rounds_to_two_decimals() {
    let html = render(&success("", "", Some(0.875)));
    assert!(html.contains("Code Quality Score: 0.88 / 1.00"));

    let html = render(&success("", "", Some(0.5)));
    assert!(html.contains("Code Quality Score: 0.50 / 1.00"));

    let html = render(&success("", "", Some(1.0)));
    assert!(html.contains("Code Quality Score: 1.00 / 1.00"));
}

#[test]
fn empty_review_still_gets_its_section() {
    let html = render(&success("", "", None));
    assert_eq!(
        html,
        r#"<div class="review-content"><h2>Review Comments</h2></div>"#
    );
}

#[test]
fn raw_html_in_markdown_is_escaped() {
    let html = render(&success("hi <script>alert(1)</script>", "", None));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn fix_section_appears_only_for_nonblank_fix() {
    let html = render(&success("ok", "use `snake_case`", None));
    assert!(html.contains("<h2>Suggested Fix</h2>"));
    assert!(html.contains("<code>snake_case</code>"));

    let html = render(&success("ok", "   ", None));
    assert!(!html.contains("Suggested Fix"));
}

#[test]
fn failure_message_is_escaped_into_the_error_element() {
    let html = render(&RequestOutcome::Failure("<b>boom</b> & bust".to_string()));
    assert_eq!(
        html,
        r#"<div class="error">&lt;b&gt;boom&lt;/b&gt; &amp; bust</div>"#
    );
}
