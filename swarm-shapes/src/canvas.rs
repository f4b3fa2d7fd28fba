use swarm_core::{Mask, Vector2D};

/// Binary drawing surface. Pixels are sampled at their centers; everything
/// drawn off the surface is clipped.
#[derive(Debug, Clone)]
pub struct Canvas {
    mask: Mask,
    ink: bool,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            mask: Mask::new(width, height),
            ink: true,
        }
    }

    pub fn width(&self) -> f32 {
        self.mask.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.mask.height() as f32
    }

    /// `true` paints shape pixels, `false` cuts holes
    pub fn set_ink(&mut self, on: bool) {
        self.ink = on;
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn into_mask(self) -> Mask {
        self.mask
    }

    /// Axis-aligned rectangle from its top-left corner
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.fill_where(x, y, x + w, y + h, |_, _| true);
    }

    pub fn rect_centered(&mut self, cx: f32, cy: f32, w: f32, h: f32) {
        self.rect(cx - w * 0.5, cy - h * 0.5, w, h);
    }

    /// Filled ellipse with diameters `w` by `h`
    pub fn ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32) {
        let (rx, ry) = (w * 0.5, h * 0.5);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.fill_where(cx - rx, cy - ry, cx + rx, cy + ry, |x, y| {
            in_ellipse(x - cx, y - cy, rx, ry)
        });
    }

    /// Ellipse outline of the given stroke weight
    pub fn ring(&mut self, cx: f32, cy: f32, w: f32, h: f32, weight: f32) {
        let half = weight.max(1.0) * 0.5;
        let (outer_x, outer_y) = (w * 0.5 + half, h * 0.5 + half);
        let (inner_x, inner_y) = (w * 0.5 - half, h * 0.5 - half);
        let hollow = inner_x > 0.0 && inner_y > 0.0;

        self.fill_where(
            cx - outer_x,
            cy - outer_y,
            cx + outer_x,
            cy + outer_y,
            |x, y| {
                let (dx, dy) = (x - cx, y - cy);
                in_ellipse(dx, dy, outer_x, outer_y)
                    && !(hollow && in_ellipse(dx, dy, inner_x, inner_y))
            },
        );
    }

    /// Stroked segment; weights below one pixel are drawn one pixel wide
    pub fn line(&mut self, a: Vector2D, b: Vector2D, weight: f32) {
        let half = weight.max(1.0) * 0.5;
        self.fill_where(
            a.x.min(b.x) - half,
            a.y.min(b.y) - half,
            a.x.max(b.x) + half,
            a.y.max(b.y) + half,
            |x, y| segment_distance(Vector2D::new(x, y), a, b) <= half,
        );
    }

    pub fn triangle(&mut self, a: Vector2D, b: Vector2D, c: Vector2D) {
        self.polygon(&[a, b, c]);
    }

    pub fn quad(&mut self, a: Vector2D, b: Vector2D, c: Vector2D, d: Vector2D) {
        self.polygon(&[a, b, c, d]);
    }

    /// Even-odd fill of a closed polygon
    pub fn polygon(&mut self, points: &[Vector2D]) {
        if points.len() < 3 {
            return;
        }
        let (mut x0, mut y0) = (f32::MAX, f32::MAX);
        let (mut x1, mut y1) = (f32::MIN, f32::MIN);
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        self.fill_where(x0, y0, x1, y1, |x, y| polygon_contains(points, x, y));
    }

    /// Cubic bezier stroke, flattened into short segments
    pub fn bezier(&mut self, p0: Vector2D, p1: Vector2D, p2: Vector2D, p3: Vector2D, weight: f32) {
        const SEGMENTS: usize = 32;
        let mut previous = p0;
        for i in 1..=SEGMENTS {
            let t = i as f32 / SEGMENTS as f32;
            let u = 1.0 - t;
            let point = p0 * (u * u * u)
                + p1 * (3.0 * u * u * t)
                + p2 * (3.0 * u * t * t)
                + p3 * (t * t * t);
            self.line(previous, point, weight);
            previous = point;
        }
    }

    fn fill_where<F>(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, inside: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        let (width, height) = (self.mask.width(), self.mask.height());
        let col_start = x0.floor().max(0.0) as usize;
        let col_end = (x1.ceil().max(0.0) as usize).min(width);
        let row_start = y0.floor().max(0.0) as usize;
        let row_end = (y1.ceil().max(0.0) as usize).min(height);

        for py in row_start..row_end {
            let y = py as f32 + 0.5;
            if y < y0 || y >= y1 {
                continue;
            }
            for px in col_start..col_end {
                let x = px as f32 + 0.5;
                if x >= x0 && x < x1 && inside(x, y) {
                    self.mask.set(px, py, self.ink);
                }
            }
        }
    }
}

fn in_ellipse(dx: f32, dy: f32, rx: f32, ry: f32) -> bool {
    let (nx, ny) = (dx / rx, dy / ry);
    nx * nx + ny * ny <= 1.0
}

fn segment_distance(p: Vector2D, a: Vector2D, b: Vector2D) -> f32 {
    let ab = b - a;
    let length_sq = ab.x * ab.x + ab.y * ab.y;
    if length_sq == 0.0 {
        return p.distance(&a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / length_sq).clamp(0.0, 1.0);
    p.distance(&(a + ab * t))
}

fn polygon_contains(points: &[Vector2D], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
