use core::f32::consts::{PI, TAU};

use swarm_core::Vector2D;

use crate::canvas::Canvas;

fn v(x: f32, y: f32) -> Vector2D {
    Vector2D::new(x, y)
}

/// Castle with flanking towers, spires and a crenellated front wall
pub fn castle(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let cx = w * 0.5;
    let base_y = h * 0.82;
    let unit = w.min(h) * 0.09;

    canvas.rect_centered(cx, base_y - unit, unit * 7.0, unit * 2.0);

    for side in [-1.0, 1.0] {
        let tx = cx + side * unit * 3.0;
        canvas.rect_centered(tx, base_y - unit * 2.1, unit * 1.6, unit * 3.2);
        canvas.triangle(
            v(tx - unit, base_y - unit * 3.7),
            v(tx + unit, base_y - unit * 3.7),
            v(tx, base_y - unit * 4.9),
        );
        canvas.rect_centered(tx, base_y - unit * 4.4, unit * 0.9, unit * 1.3);
        canvas.triangle(
            v(tx - unit * 0.7, base_y - unit * 5.0),
            v(tx + unit * 0.7, base_y - unit * 5.0),
            v(tx, base_y - unit * 5.9),
        );
    }

    // keep
    canvas.rect_centered(cx, base_y - unit * 2.9, unit * 2.3, unit * 4.6);
    canvas.triangle(
        v(cx - unit * 1.5, base_y - unit * 5.0),
        v(cx + unit * 1.5, base_y - unit * 5.0),
        v(cx, base_y - unit * 6.8),
    );
    canvas.rect_centered(cx, base_y - unit * 7.3, unit * 0.55, unit * 1.7);
    canvas.triangle(
        v(cx - unit * 0.5, base_y - unit * 8.0),
        v(cx + unit * 0.5, base_y - unit * 8.0),
        v(cx, base_y - unit * 9.1),
    );

    for side in [-1.0, 1.0] {
        let sx = cx + side * unit * 1.8;
        canvas.rect_centered(sx, base_y - unit * 4.8, unit * 0.6, unit * 1.4);
        canvas.triangle(
            v(sx - unit * 0.5, base_y - unit * 5.5),
            v(sx + unit * 0.5, base_y - unit * 5.5),
            v(sx, base_y - unit * 6.3),
        );
    }

    // pennant
    canvas.quad(
        v(cx, base_y - unit * 9.1),
        v(cx + unit, base_y - unit * 8.8),
        v(cx + unit * 0.2, base_y - unit * 8.4),
        v(cx, base_y - unit * 8.4),
    );

    let front_w = unit * 6.0;
    let front_h = unit * 1.6;
    let front_x = cx - front_w * 0.5;
    let front_y = base_y - front_h;
    canvas.rect(front_x, front_y, front_w, front_h);

    let tooth_w = unit * 0.6;
    let tooth_h = unit * 0.8;
    let teeth = 8;
    for i in 0..teeth {
        let bx = front_x + i as f32 * (front_w / (teeth - 1) as f32);
        canvas.rect(bx - tooth_w * 0.5, front_y - tooth_h, tooth_w, tooth_h);
    }

    // gate and windows
    canvas.set_ink(false);
    canvas.rect_centered(cx, base_y - unit * 0.8, unit * 1.6, unit * 2.2);
    canvas.rect_centered(cx, base_y - unit * 3.3, unit * 0.7, unit * 1.1);
    canvas.rect_centered(cx, base_y - unit * 4.3, unit * 0.5, unit * 0.9);
    for side in [-1.0, 1.0] {
        canvas.rect_centered(cx + side * unit * 3.0, base_y - unit * 2.3, unit * 0.4, unit * 0.9);
    }
    canvas.set_ink(true);
}

/// Geodesic sphere on two legs and a plinth
pub fn epcot(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let (cx, cy) = (w * 0.5, h * 0.5);
    let r = w.min(h) * 0.31;

    canvas.ellipse(cx, cy, r * 2.0, r * 2.0);
    canvas.ring(cx, cy, r * 2.0, r * 2.0, 2.0);

    let leg_top = cy + r * 0.6;
    let leg_bottom = cy + r * 1.25;
    canvas.quad(
        v(cx - r * 0.6, leg_top),
        v(cx - r * 0.25, leg_top),
        v(cx - r * 0.05, leg_bottom),
        v(cx - r * 0.8, leg_bottom),
    );
    canvas.quad(
        v(cx + r * 0.6, leg_top),
        v(cx + r * 0.25, leg_top),
        v(cx + r * 0.05, leg_bottom),
        v(cx + r * 0.8, leg_bottom),
    );

    let base_h = r * 0.35;
    canvas.rect_centered(cx, leg_bottom + base_h * 0.35, r * 2.0, base_h);
}

/// Observation wheel: rim, spokes, gondolas, hub and A-frame base
pub fn eye(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let (cx, cy) = (w * 0.5, h * 0.53);
    let outer = w.min(h) * 0.33;
    let inner = outer * 0.72;

    canvas.ring(cx, cy, outer * 2.0, outer * 2.0, 3.0);

    let spokes = 24;
    for i in 0..spokes {
        let dir = Vector2D::from_angle(TAU * i as f32 / spokes as f32);
        canvas.line(
            v(cx, cy) + dir * inner,
            v(cx, cy) + dir * outer,
            3.0,
        );
        let gondola = v(cx, cy) + dir * (outer + 8.0);
        canvas.rect_centered(gondola.x, gondola.y, outer * 0.08, outer * 0.11);
    }

    canvas.ellipse(cx, cy, inner * 1.3, inner * 1.3);

    let base_y = cy + outer * 1.05;
    let base_w = outer * 1.8;
    let base_h = outer * 0.24;
    canvas.rect_centered(cx, base_y + base_h * 0.45, base_w, base_h);
    for side in [-1.0, 1.0] {
        canvas.triangle(
            v(cx + side * outer * 0.5, base_y),
            v(cx + side * outer * 0.15, base_y),
            v(cx + side * outer * 0.75, base_y + base_h * 1.6),
        );
    }
}

/// Striped flag with a solid canton
pub fn flag(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let flag_h = h * 0.65;
    let flag_w = flag_h * 1.9;
    let fx = (w - flag_w) * 0.5;
    let fy = (h - flag_h) * 0.5;

    let stripes = 13;
    let stripe_h = flag_h / stripes as f32;
    for i in (0..stripes).step_by(2) {
        canvas.rect(fx, fy + i as f32 * stripe_h, flag_w, stripe_h * 0.9);
    }

    canvas.rect(fx, fy, flag_w * 0.4, stripe_h * 7.0);
}

/// Head and two ears
pub fn mickey(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let (cx, cy) = (w * 0.5, h * 0.5);
    let head = w.min(h) * 0.22;
    let ear = head * 0.55;

    canvas.ellipse(cx, cy, head * 2.0, head * 2.0);
    for side in [-1.0, 1.0] {
        canvas.ellipse(cx + side * head * 0.9, cy - head * 0.85, ear * 2.0, ear * 2.0);
    }
}

/// Globe on a stepped base
pub fn universal(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let (cx, cy) = (w * 0.5, h * 0.45);
    let r = w.min(h) * 0.26;

    canvas.ellipse(cx, cy, r * 2.0, r * 2.0);
    canvas.ring(cx, cy, r * 2.0, r * 2.0, 2.0);

    let base_w = r * 2.4;
    let base_h = r * 0.35;
    let base_y = cy + r * 1.05;
    canvas.rect_centered(cx, base_y, base_w, base_h);

    let arch_h = r * 0.3;
    canvas.rect_centered(cx, base_y - arch_h * 0.9, base_w * 0.7, arch_h);
}

/// Ball with motion streaks and a star
pub fn magic(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let (cx, cy) = (w * 0.45, h * 0.5);
    let r = w.min(h) * 0.22;

    canvas.ellipse(cx, cy, r * 2.0, r * 2.0);

    let streaks = 5;
    for i in 0..streaks {
        let offset = -r * 0.6 + r * 1.2 * i as f32 / (streaks - 1) as f32;
        canvas.bezier(
            v(cx - r * 1.2, cy + offset),
            v(cx - r * 0.4, cy + offset * 0.2),
            v(cx + r * 0.4, cy + offset * 0.6),
            v(cx + r * 1.4, cy + offset * 0.4),
            3.0,
        );
    }

    let star = v(cx + r * 1.15, cy - r * 0.6);
    let star_r = r * 0.25;
    let points = 5;
    let outline: Vec<Vector2D> = (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { star_r } else { star_r * 0.45 };
            star + Vector2D::from_angle(PI / points as f32 * i as f32) * radius
        })
        .collect();
    canvas.polygon(&outline);
}
