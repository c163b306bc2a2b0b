pub mod detections;
pub mod pages;
