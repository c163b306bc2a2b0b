use camwatch_core::detection::Detection;

use super::{detection_header, detection_rows, html_escape, layout};

/// One video: the player (when a clip exists) and its detections in clip order.
pub fn render(video_id: &str, detections: &[Detection], video_url: Option<&str>) -> String {
    let player = match video_url {
        Some(url) => format!(
            r#"<video id="player" controls preload="metadata" src="{}"></video>"#,
            html_escape(url)
        ),
        None => r#"<p class="empty" id="no-video">Video unavailable.</p>"#.to_string(),
    };

    let camera = detections
        .first()
        .map(|d| html_escape(&d.camera_id))
        .unwrap_or_default();

    let content = format!(
        r#"<h1>Video {video}</h1>
<p class="meta">Camera {camera}</p>
{player}
<table>
{header}
{rows}
</table>"#,
        video = html_escape(video_id),
        header = detection_header(false),
        rows = detection_rows(detections, false),
    );
    layout(&format!("Video {video_id}"), &content)
}
