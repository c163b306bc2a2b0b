use camwatch_core::video::VideoGroup;

use super::{detection_header, detection_rows, error_banner, html_escape, layout, video_href};

/// Dashboard: one card per video, detections in recency order.
pub fn render(videos: &[VideoGroup], error: Option<&str>) -> String {
    let cards = if videos.is_empty() {
        r#"<p class="empty">No detections recorded yet.</p>"#.to_string()
    } else {
        videos
            .iter()
            .map(|v| {
                format!(
                    r#"<section class="video-card">
<h2><a href="{href}">{video}</a></h2>
<p class="meta">Camera {camera} &middot; {count} detection{plural}</p>
<table>
{header}
{rows}
</table>
</section>"#,
                    href = video_href(&v.video_id),
                    video = html_escape(&v.video_id),
                    camera = html_escape(&v.camera_id),
                    count = v.detections.len(),
                    plural = if v.detections.len() == 1 { "" } else { "s" },
                    header = detection_header(false),
                    rows = detection_rows(&v.detections, false),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        "<h1>Videos</h1>\n{banner}\n{cards}",
        banner = error_banner(error),
    );
    layout("Dashboard", &content)
}
