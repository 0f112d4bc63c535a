use ab_glyph::{FontArc, PxScale};
use image::{DynamicImage, Rgba, RgbaImage};
use image::imageops::FilterType;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use Common::portal::utils::detection::Detection;
use Common::utils::log_entry::io::IOEntry;
use crate::portal::utils::annotation::{BoxAnnotation, OverlayStyle, LABEL_BOX_HEIGHT, LABEL_BOX_PADDING, LABEL_TEXT_INSET};
use crate::portal::utils::display_geometry::DisplayGeometry;
use crate::utils::logging::*;
use crate::utils::static_files::StaticFiles;

const LABEL_FONT_ASSET: &str = "fonts/DejaVuSans.ttf";
//Display coordinates past this are off canvas at every fitted size; the
//rasterizer clamps to it before any integer arithmetic.
const PIXEL_LIMIT: f64 = 1_048_576.0;

//Annotation happens in three explicit steps: the geometry fit is computed by
//the caller, plan() maps detections into display coordinates, and the draw
//functions rasterize onto a fresh surface. Re-running any step with the same
//inputs produces the same output.
pub struct OverlayRenderer {
    font: FontArc,
}

impl OverlayRenderer {
    pub fn new() -> Result<Self, LogEntry> {
        let font_file = StaticFiles::get(LABEL_FONT_ASSET)
            .ok_or(error_entry!(IOEntry::MissingAssetError(LABEL_FONT_ASSET.to_string())))?;
        let font = FontArc::try_from_vec(font_file.data.into_owned())
            .map_err(|_| error_entry!(IOEntry::FontParseError))?;
        Ok(Self { font })
    }

    pub fn plan(&self, style: &OverlayStyle, detections: &[Detection], geometry: &DisplayGeometry) -> Vec<BoxAnnotation> {
        if !geometry.is_renderable() {
            return Vec::new();
        }
        let scale_x = geometry.scale_x();
        let scale_y = geometry.scale_y();
        detections.iter().map(|detection| {
            let left = detection.bbox.x1 * scale_x;
            let top = detection.bbox.y1 * scale_y;
            let label = format!("{} {}%", detection.label, (detection.confidence * 100.0).round() as i64);
            let (text_width, _text_height) = text_size(PxScale::from(style.font_size), &self.font, &label);
            BoxAnnotation {
                left,
                top,
                right: detection.bbox.x2 * scale_x,
                bottom: detection.bbox.y2 * scale_y,
                color: style.confidence_color(detection.confidence),
                label,
                label_left: left,
                label_top: top - LABEL_BOX_HEIGHT,
                label_width: text_width as f64 + LABEL_BOX_PADDING,
                label_height: LABEL_BOX_HEIGHT,
            }
        }).collect()
    }

    //Overlay alone, on a transparent surface at display size.
    pub fn render(&self, style: &OverlayStyle, detections: &[Detection], geometry: &DisplayGeometry) -> RgbaImage {
        let mut canvas = RgbaImage::new(geometry.display_width, geometry.display_height);
        self.draw_annotations(&mut canvas, style, detections, geometry);
        canvas
    }

    //The composite served to the page: photo resized to display size with
    //the overlay drawn on top.
    pub fn annotate(&self, style: &OverlayStyle, photo: &DynamicImage, detections: &[Detection], geometry: &DisplayGeometry) -> RgbaImage {
        if !geometry.is_renderable() {
            return RgbaImage::new(geometry.display_width, geometry.display_height);
        }
        let mut canvas = photo
            .resize_exact(geometry.display_width, geometry.display_height, FilterType::Triangle)
            .to_rgba8();
        self.draw_annotations(&mut canvas, style, detections, geometry);
        canvas
    }

    fn draw_annotations(&self, canvas: &mut RgbaImage, style: &OverlayStyle, detections: &[Detection], geometry: &DisplayGeometry) {
        for annotation in self.plan(style, detections, geometry) {
            self.draw_annotation(canvas, style, &annotation);
        }
    }

    fn draw_annotation(&self, canvas: &mut RgbaImage, style: &OverlayStyle, annotation: &BoxAnnotation) {
        let color = Self::solid(annotation.color);
        let left = Self::pixel(annotation.left);
        let top = Self::pixel(annotation.top);
        let width = Self::extent(annotation.left, annotation.right);
        let height = Self::extent(annotation.top, annotation.bottom);
        let base_rectangle = Rect::at(left, top).of_size(width, height);
        for i in 0..style.stroke_width {
            let offset_rect = Rect::at(base_rectangle.left() - i as i32, base_rectangle.top() - i as i32)
                .of_size(base_rectangle.width() + 2 * i, base_rectangle.height() + 2 * i);
            draw_hollow_rect_mut(canvas, offset_rect, color);
        }
        let label_left = Self::pixel(annotation.label_left);
        let label_top = Self::pixel(annotation.label_top);
        let label_width = Self::extent(0.0, annotation.label_width);
        let label_height = Self::extent(0.0, annotation.label_height);
        draw_filled_rect_mut(canvas, Rect::at(label_left, label_top).of_size(label_width, label_height), color);
        let text_left = Self::pixel(annotation.label_left + LABEL_TEXT_INSET);
        let text_top = Self::pixel(annotation.label_top + (LABEL_BOX_HEIGHT - style.font_size as f64) / 2.0);
        draw_text_mut(canvas, Self::solid(style.label_text_color), text_left, text_top, PxScale::from(style.font_size), &self.font, &annotation.label);
    }

    //Whole display pixels, kept inside PIXEL_LIMIT so the rectangle math
    //stays in i32 range whatever coordinates the backend reported.
    fn pixel(value: f64) -> i32 {
        value.round().max(-PIXEL_LIMIT).min(PIXEL_LIMIT) as i32
    }

    fn extent(start: f64, end: f64) -> u32 {
        (Self::pixel(end) - Self::pixel(start)).max(1) as u32
    }

    fn solid(color: [u8; 3]) -> Rgba<u8> {
        Rgba([color[0], color[1], color[2], 255_u8])
    }
}
