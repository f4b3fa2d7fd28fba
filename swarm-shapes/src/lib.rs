//! Built-in shape rasterizer: bitmap text for word tokens and drawn
//! silhouettes for the icon tokens.

pub mod canvas;
pub mod icons;
pub mod text;

pub use canvas::Canvas;

use swarm_core::{Mask, ShapeRasterizer, Vector2D};

/// Tokens drawn as pictures instead of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Castle,
    Epcot,
    Eye,
    Flag,
    Mickey,
    Universal,
    Magic,
}

impl Icon {
    pub const ALL: [Icon; 7] = [
        Icon::Castle,
        Icon::Epcot,
        Icon::Eye,
        Icon::Flag,
        Icon::Mickey,
        Icon::Universal,
        Icon::Magic,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.token() == token)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Icon::Castle => "CASTLE",
            Icon::Epcot => "EPCOT",
            Icon::Eye => "EYE",
            Icon::Flag => "FLAG",
            Icon::Mickey => "MICKEY",
            Icon::Universal => "UNIVERSAL",
            Icon::Magic => "MAGIC",
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        match self {
            Icon::Castle => icons::castle(canvas),
            Icon::Epcot => icons::epcot(canvas),
            Icon::Eye => icons::eye(canvas),
            Icon::Flag => icons::flag(canvas),
            Icon::Mickey => icons::mickey(canvas),
            Icon::Universal => icons::universal(canvas),
            Icon::Magic => icons::magic(canvas),
        }
    }
}

/// Rasterizer for every token the show uses; anything that is not an icon is
/// rendered as text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinRasterizer {
    /// Vertical center of the text line as a fraction of the height
    pub text_center: f32,
    /// Widest a text line may get as a fraction of the width
    pub text_max_width: f32,
}

impl Default for BuiltinRasterizer {
    fn default() -> Self {
        Self {
            text_center: 0.65,
            text_max_width: 0.95,
        }
    }
}

impl BuiltinRasterizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShapeRasterizer for BuiltinRasterizer {
    fn rasterize(&self, token: &str, width: usize, height: usize) -> Mask {
        let mut canvas = Canvas::new(width, height);
        match Icon::from_token(token) {
            Some(icon) => icon.draw(&mut canvas),
            None => {
                let (w, h) = (width as f32, height as f32);
                let size = h * text::size_factor(token.chars().count());
                let center = Vector2D::new(w * 0.5, h * self.text_center);
                text::draw_text(&mut canvas, token, size, center, w * self.text_max_width);
            }
        }
        log::trace!(
            "rasterized '{}' at {}x{}: {} pixels",
            token,
            width,
            height,
            canvas.mask().count_on()
        );
        canvas.into_mask()
    }
}
