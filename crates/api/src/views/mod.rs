//! HTML rendering for the three dashboard pages.
//!
//! Pages are assembled with `format!`; every piece of stored or user text
//! goes through [`html_escape`] and every path segment through
//! `urlencoding`.

pub mod dashboard;
pub mod search;
pub mod video;

use camwatch_core::detection::Detection;
use camwatch_core::types::Timestamp;

/// Escape text for safe inclusion in HTML bodies and quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Link target for a video page.
pub fn video_href(video_id: &str) -> String {
    format!("/video/{}", urlencoding::encode(video_id))
}

/// `2024-05-01 11:59:00 UTC`
pub fn format_time(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Clip offset as `m:ss`.
pub fn format_offset(secs: i32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Confidence as a whole percentage.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// Wrap page content in the shared document shell.
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Camwatch</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header class="topbar">
  <a class="brand" href="/">Camwatch</a>
  <form class="search" action="/search" method="get">
    <input type="search" name="item" placeholder="Search items" aria-label="Search items">
    <button type="submit">Search</button>
  </form>
</header>
<main>
{content}
</main>
<script src="/static/app.js" defer></script>
</body>
</html>"#,
        title = html_escape(title),
    )
}

/// Error banner, or nothing.
pub fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!(
            r#"<div class="error" role="alert">{}</div>"#,
            html_escape(msg)
        ),
        None => String::new(),
    }
}

/// One `<tr>` per detection. `with_video` adds a column linking to the video.
pub fn detection_rows(detections: &[Detection], with_video: bool) -> String {
    detections
        .iter()
        .map(|d| {
            let video_cell = if with_video {
                format!(
                    r#"<td><a href="{href}">{video}</a></td><td>{camera}</td>"#,
                    href = video_href(&d.video_id),
                    video = html_escape(&d.video_id),
                    camera = html_escape(&d.camera_id),
                )
            } else {
                String::new()
            };
            format!(
                r#"<tr data-detection-id="{id}">
  <td>{item}</td>
  <td>{confidence}</td>
  <td>{time}</td>
  <td><button type="button" class="seek" data-offset="{offset_secs}">{offset}</button></td>
  {video_cell}
  <td><button type="button" class="delete" data-id="{id}">Delete</button></td>
</tr>"#,
                id = d.id,
                item = html_escape(&d.item),
                confidence = format_confidence(d.confidence),
                time = format_time(&d.timestamp),
                offset_secs = d.timestamp_sec,
                offset = format_offset(d.timestamp_sec),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table header matching [`detection_rows`].
pub fn detection_header(with_video: bool) -> String {
    let video_cols = if with_video {
        "<th>Video</th><th>Camera</th>"
    } else {
        ""
    };
    format!(
        "<tr><th>Item</th><th>Confidence</th><th>Time</th><th>Offset</th>{video_cols}<th></th></tr>"
    )
}
