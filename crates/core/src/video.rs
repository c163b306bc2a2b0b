//! Read-time grouping of detections into videos.

use serde::Serialize;

use crate::detection::Detection;

/// All detections sharing a `video_id`. Never stored; rebuilt on each read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGroup {
    pub video_id: String,
    /// Taken from the first detection seen for this video.
    pub camera_id: String,
    pub detections: Vec<Detection>,
}

/// Group detections by `video_id`.
///
/// Groups appear in order of their first detection in `detections`, and each
/// group keeps its detections in input order. Feeding a recency-sorted list
/// therefore yields the most recently active video first.
pub fn group_by_video(detections: Vec<Detection>) -> Vec<VideoGroup> {
    let mut groups: Vec<VideoGroup> = Vec::new();

    for detection in detections {
        match groups.iter_mut().find(|g| g.video_id == detection.video_id) {
            Some(group) => group.detections.push(detection),
            None => groups.push(VideoGroup {
                video_id: detection.video_id.clone(),
                camera_id: detection.camera_id.clone(),
                detections: vec![detection],
            }),
        }
    }

    groups
}
