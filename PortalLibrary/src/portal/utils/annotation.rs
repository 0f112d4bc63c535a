use crate::utils::config::Config;

pub const HIGH_CONFIDENCE: f64 = 0.70;
pub const MEDIUM_CONFIDENCE: f64 = 0.50;
//Label box metrics in display pixels: a 20px band above the box edge, the
//measured text width plus 10px of padding, text inset 5px from the left.
pub const LABEL_BOX_HEIGHT: f64 = 20.0;
pub const LABEL_BOX_PADDING: f64 = 10.0;
pub const LABEL_TEXT_INSET: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub stroke_width: u32,
    pub font_size: f32,
    pub high_confidence_color: [u8; 3],
    pub medium_confidence_color: [u8; 3],
    pub low_confidence_color: [u8; 3],
    pub label_text_color: [u8; 3],
}

impl OverlayStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            stroke_width: config.stroke_width,
            font_size: config.font_size,
            high_confidence_color: config.high_confidence_color,
            medium_confidence_color: config.medium_confidence_color,
            low_confidence_color: config.low_confidence_color,
            label_text_color: config.label_text_color,
        }
    }

    pub fn confidence_color(&self, confidence: f64) -> [u8; 3] {
        if confidence >= HIGH_CONFIDENCE {
            self.high_confidence_color
        } else if confidence >= MEDIUM_CONFIDENCE {
            self.medium_confidence_color
        } else {
            //NaN lands here: both comparisons above are false.
            self.low_confidence_color
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2,
            font_size: 14.0,
            high_confidence_color: [0, 200, 0],
            medium_confidence_color: [255, 165, 0],
            low_confidence_color: [255, 0, 0],
            label_text_color: [255, 255, 255],
        }
    }
}

//One planned annotation in display coordinates. Values stay f64 and
//unclamped; rounding and clipping happen only at rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxAnnotation {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub color: [u8; 3],
    pub label: String,
    pub label_left: f64,
    pub label_top: f64,
    pub label_width: f64,
    pub label_height: f64,
}
