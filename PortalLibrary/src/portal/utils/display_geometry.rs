//Largest container edge fit() will honor; larger requests are clamped to it.
pub const MAX_CONTAINER_DIMENSION: u32 = 8192;

//How the page shows an uploaded photo: scaled uniformly to fit the display
//container while preserving aspect ratio, the same contract as
//object-fit: contain. Detections arrive in natural coordinates, so every
//annotation is mapped through the per-axis factors below.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayGeometry {
    pub natural_width: u32,
    pub natural_height: u32,
    pub display_width: u32,
    pub display_height: u32,
}

impl DisplayGeometry {
    pub fn fit(natural_width: u32, natural_height: u32, container_width: u32, container_height: u32) -> Self {
        if natural_width == 0 || natural_height == 0 {
            return Self {
                natural_width,
                natural_height,
                display_width: 0,
                display_height: 0,
            };
        }
        let container_width = container_width.min(MAX_CONTAINER_DIMENSION);
        let container_height = container_height.min(MAX_CONTAINER_DIMENSION);
        let scale = (container_width as f64 / natural_width as f64)
            .min(container_height as f64 / natural_height as f64);
        Self {
            natural_width,
            natural_height,
            display_width: (natural_width as f64 * scale).round() as u32,
            display_height: (natural_height as f64 * scale).round() as u32,
        }
    }

    pub fn scale_x(&self) -> f64 {
        self.display_width as f64 / self.natural_width as f64
    }

    pub fn scale_y(&self) -> f64 {
        self.display_height as f64 / self.natural_height as f64
    }

    pub fn is_renderable(&self) -> bool {
        self.natural_width > 0 && self.natural_height > 0
            && self.display_width > 0 && self.display_height > 0
    }

    pub fn valid_container(container_width: u32, container_height: u32) -> bool {
        (1..=MAX_CONTAINER_DIMENSION).contains(&container_width)
            && (1..=MAX_CONTAINER_DIMENSION).contains(&container_height)
    }
}
