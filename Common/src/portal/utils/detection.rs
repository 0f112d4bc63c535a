use serde::{Serialize, Deserialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub confidence: f64,
    #[serde(rename = "class")]
    pub label: String,
}

//The backend owns the response schema. Anything beyond a detections array is
//kept opaquely in raw and never interpreted here.
#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub raw: Value,
    pub detections: Vec<Detection>,
}

impl DetectionReport {
    pub fn from_value(raw: Value) -> Self {
        let detections = raw.get("detections")
            .cloned()
            .and_then(|detections| serde_json::from_value::<Vec<Detection>>(detections).ok())
            .unwrap_or_default();
        Self { raw, detections }
    }

    pub fn detection_count(&self) -> usize {
        self.detections.len()
    }
}
