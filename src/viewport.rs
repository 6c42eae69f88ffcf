//! Viewport state: logical size and the capped device pixel ratio.

/// Device pixel ratios above this are rendered at this ratio.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Zero dimensions are raised to one so the aspect ratio stays finite.
    pub fn new(width: u32, height: u32, device_ratio: f64) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: cap_pixel_ratio(device_ratio),
        }
    }

    /// Applies a resize event. Returns `false` and leaves the state untouched
    /// when either dimension is zero, which happens while a window is minimised.
    pub fn resize(&mut self, width: u32, height: u32, device_ratio: f64) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixel_ratio = cap_pixel_ratio(device_ratio);
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Size of the drawing buffer in physical pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

/// `min(device_ratio, 2)`; non-finite or non-positive ratios count as 1.
pub fn cap_pixel_ratio(device_ratio: f64) -> f32 {
    if !device_ratio.is_finite() || device_ratio <= 0.0 {
        return 1.0;
    }
    (device_ratio as f32).min(MAX_PIXEL_RATIO)
}

/// Converts a physical window size to logical pixels.
pub fn logical_size(physical_width: u32, physical_height: u32, scale_factor: f64) -> (u32, u32) {
    let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    let to_logical = |v: u32| (v as f64 / scale_factor).round() as u32;
    (to_logical(physical_width), to_logical(physical_height))
}

/// Converts a logical length to physical pixels, at least one.
pub fn physical_length(logical: u32, scale_factor: f64) -> u32 {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return logical.max(1);
    }
    ((logical as f64 * scale_factor).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_cap_pixel_ratio_at_two() {
        assert_eq!(cap_pixel_ratio(3.0), 2.0);
        assert_eq!(cap_pixel_ratio(1.0), 1.0);
        assert_eq!(cap_pixel_ratio(1.5), 1.5);
        assert_eq!(cap_pixel_ratio(f64::NAN), 1.0);
        assert_eq!(cap_pixel_ratio(0.0), 1.0);
    }

    #[test]
    fn should_ignore_zero_sized_resize() {
        let mut viewport = Viewport::new(800, 600, 1.0);
        assert!(!viewport.resize(0, 600, 1.0));
        assert_eq!(viewport, Viewport::new(800, 600, 1.0));
    }

    #[test]
    fn should_scale_drawing_buffer_by_capped_ratio() {
        let viewport = Viewport::new(800, 600, 3.0);
        assert_eq!(viewport.drawing_buffer_size(), (1600, 1200));
    }

    #[test]
    fn should_convert_physical_to_logical_size() {
        assert_eq!(logical_size(2560, 1440, 2.0), (1280, 720));
        assert_eq!(logical_size(800, 600, 0.0), (800, 600));
    }
}
