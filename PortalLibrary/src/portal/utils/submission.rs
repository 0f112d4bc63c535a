use std::sync::Arc;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use Common::portal::utils::detection::{Detection, DetectionReport};

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    ImageSelected,
    Submitting,
    ResultReady,
    ResultError,
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Visual,
    Json,
}

//The photo currently on screen. Held in memory only and replaced wholesale
//by the next selection; the Arc keeps snapshots cheap for the render path.
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub file_name: String,
    pub natural_width: u32,
    pub natural_height: u32,
    pub image: Arc<DynamicImage>,
}

impl StoredPhoto {
    pub fn new(file_name: String, image: DynamicImage) -> Self {
        let natural_width = image.width();
        let natural_height = image.height();
        Self {
            file_name,
            natural_width,
            natural_height,
            image: Arc::new(image),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub sequence: u64,
    pub status: SubmissionStatus,
    pub view_mode: ViewMode,
    pub photo: Option<StoredPhoto>,
    pub report: Option<DetectionReport>,
    pub error: Option<String>,
}

impl Submission {
    pub fn new() -> Self {
        Self {
            sequence: 0_u64,
            status: SubmissionStatus::Idle,
            view_mode: ViewMode::Visual,
            photo: None,
            report: None,
            error: None,
        }
    }

    pub fn with_photo(photo: StoredPhoto) -> Self {
        Self {
            sequence: 0_u64,
            status: SubmissionStatus::ImageSelected,
            view_mode: ViewMode::Visual,
            photo: Some(photo),
            report: None,
            error: None,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct SubmissionView {
    pub status: SubmissionStatus,
    pub view_mode: ViewMode,
    pub sequence: u64,
    pub file_name: Option<String>,
    pub natural_width: Option<u32>,
    pub natural_height: Option<u32>,
    pub detection_count: usize,
    pub detections: Vec<Detection>,
    pub report: Option<Value>,
    pub error: Option<String>,
}

impl From<&Submission> for SubmissionView {
    fn from(submission: &Submission) -> Self {
        Self {
            status: submission.status,
            view_mode: submission.view_mode,
            sequence: submission.sequence,
            file_name: submission.photo.as_ref().map(|photo| photo.file_name.clone()),
            natural_width: submission.photo.as_ref().map(|photo| photo.natural_width),
            natural_height: submission.photo.as_ref().map(|photo| photo.natural_height),
            detection_count: submission.report.as_ref().map(DetectionReport::detection_count).unwrap_or(0_usize),
            detections: submission.report.as_ref().map(|report| report.detections.clone()).unwrap_or_default(),
            report: submission.report.as_ref().map(|report| report.raw.clone()),
            error: submission.error.clone(),
        }
    }
}
