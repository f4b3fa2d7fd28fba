use crate::Vector2D;

/// Binary pixel mask of a rasterized silhouette, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    /// Out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = on;
        }
    }

    pub fn count_on(&self) -> usize {
        self.pixels.iter().filter(|&&on| on).count()
    }

    /// "On" pixels as `(x, y)` in scanline order
    pub fn on_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| (i % width, i / width))
    }
}

/// Off-screen raster size used when turning a shape token into a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Standard,
    High,
}

impl Resolution {
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Resolution::Standard => (640, 200),
            Resolution::High => (1280, 400),
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Resolution::Standard => Resolution::High,
            Resolution::High => Resolution::Standard,
        }
    }
}

/// Renders a shape token into a binary mask
pub trait ShapeRasterizer {
    fn rasterize(&self, token: &str, width: usize, height: usize) -> Mask;
}

impl<F> ShapeRasterizer for F
where
    F: Fn(&str, usize, usize) -> Mask,
{
    fn rasterize(&self, token: &str, width: usize, height: usize) -> Mask {
        self(token, width, height)
    }
}

/// World-space box the assembled shape is scaled into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFrame {
    pub center: Vector2D,
    pub size: Vector2D,
}

impl ShapeFrame {
    /// Centered on the canvas; canvas dimensions are floored at 1
    pub fn for_canvas(width: f32, height: f32, width_fraction: f32, aspect: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let frame_width = width.min(height) * width_fraction;
        Self {
            center: Vector2D::new(width * 0.5, height * 0.5),
            size: Vector2D::new(frame_width, frame_width * aspect),
        }
    }
}
