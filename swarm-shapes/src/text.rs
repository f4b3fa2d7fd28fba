use swarm_core::Vector2D;

use crate::canvas::Canvas;

pub const GLYPH_COLUMNS: usize = 5;
pub const GLYPH_ROWS: usize = 7;

/// Columns per character including the one-column gap
const ADVANCE: usize = GLYPH_COLUMNS + 1;

/// Share of the nominal text size taken by the capital height
const CAP_HEIGHT: f32 = 0.7;

type Glyph = [&'static str; GLYPH_ROWS];

/// 5x7 bitmap for uppercase letters and digits
pub fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'B' => ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."],
        'C' => [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."],
        'D' => ["###..", "#..#.", "#...#", "#...#", "#...#", "#..#.", "###.."],
        'E' => ["#####", "#....", "#....", "####.", "#....", "#....", "#####"],
        'F' => ["#####", "#....", "#....", "####.", "#....", "#....", "#...."],
        'G' => [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"],
        'H' => ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'I' => [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."],
        'J' => ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."],
        'K' => ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"],
        'L' => ["#....", "#....", "#....", "#....", "#....", "#....", "#####"],
        'M' => ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"],
        'N' => ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"],
        'O' => [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'P' => ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."],
        'Q' => [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"],
        'R' => ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"],
        'S' => [".####", "#....", "#....", ".###.", "....#", "....#", "####."],
        'T' => ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."],
        'U' => ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'V' => ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."],
        'W' => ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."],
        'X' => ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"],
        'Y' => ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."],
        'Z' => ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"],
        '0' => [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."],
        '1' => ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."],
        '2' => [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"],
        '3' => ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."],
        '4' => ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."],
        '5' => ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."],
        '6' => ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."],
        '7' => ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."],
        '8' => [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."],
        '9' => [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."],
        _ => return None,
    };
    Some(rows)
}

/// Text size as a fraction of the surface height: 0.9 for one character down
/// to 0.45 for twelve or more
pub fn size_factor(len: usize) -> f32 {
    let t = ((len.max(1) as f32 - 1.0) / 11.0).min(1.0);
    0.9 + (0.45 - 0.9) * t
}

/// Draw `text` centered on `center`, shrinking the cells if the line would be
/// wider than `max_width`. Characters without a glyph leave a blank cell.
pub fn draw_text(canvas: &mut Canvas, text: &str, size: f32, center: Vector2D, max_width: f32) {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || size <= 0.0 {
        return;
    }

    let columns = (chars.len() * ADVANCE - 1) as f32;
    let mut cell = size * CAP_HEIGHT / GLYPH_ROWS as f32;
    if columns * cell > max_width {
        cell = max_width / columns;
    }

    let left = center.x - columns * cell * 0.5;
    let top = center.y - GLYPH_ROWS as f32 * cell * 0.5;

    for (i, c) in chars.iter().enumerate() {
        let Some(rows) = glyph(*c) else {
            continue;
        };
        for (row, bits) in rows.iter().enumerate() {
            for (col, bit) in bits.bytes().enumerate() {
                if bit == b'#' {
                    canvas.rect(
                        left + (i * ADVANCE + col) as f32 * cell,
                        top + row as f32 * cell,
                        cell,
                        cell,
                    );
                }
            }
        }
    }
}
