use camwatch_core::detection::Detection;

use super::{detection_header, detection_rows, error_banner, html_escape, layout};

/// Search results as a flat table, newest first.
pub fn render(term: &str, results: &[Detection], error: Option<&str>) -> String {
    let body = if results.is_empty() {
        format!(
            r#"<p class="empty">No detections match &quot;{}&quot;.</p>"#,
            html_escape(term)
        )
    } else {
        format!(
            "<table>\n{}\n{}\n</table>",
            detection_header(true),
            detection_rows(results, true)
        )
    };

    let content = format!(
        "<h1>Results for &quot;{term}&quot;</h1>\n<p class=\"meta\">{count} match{plural}</p>\n{banner}\n{body}",
        term = html_escape(term),
        count = results.len(),
        plural = if results.len() == 1 { "" } else { "es" },
        banner = error_banner(error),
    );
    layout(&format!("Search: {term}"), &content)
}
