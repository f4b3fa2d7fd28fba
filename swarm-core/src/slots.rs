//! Turning a silhouette mask into world-space target points.
//!
//! On-pixels are split into one vertical bucket per character of the shape
//! token so every letter (or icon segment) receives a share of the swarm
//! proportional to the word, not to its ink. The target count never exceeds
//! the number of on-pixels; buckets that are short of pixels resample their own
//! pixels with replacement.

use rand::seq::index;
use rand::Rng;

use crate::shape::{Mask, ShapeFrame};
use crate::Vector2D;

/// Token whose points carry per-letter hue overrides
pub const MULTI_COLOR_TOKEN: &str = "PRIDE";

/// Per-letter hues for the multi-color word: red, orange, yellow, green, blue
pub const MULTI_COLOR_HUES: [f32; 5] = [0.0, 30.0, 60.0, 120.0, 240.0];

/// A world-space slot of the assembled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPoint {
    pub position: Vector2D,
    pub hue: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct SlotAllocator {
    multi_color_token: String,
    multi_color_hues: Vec<f32>,
    targets: Vec<TargetPoint>,
    buckets: Vec<usize>,
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self {
            multi_color_token: MULTI_COLOR_TOKEN.to_string(),
            multi_color_hues: MULTI_COLOR_HUES.to_vec(),
            targets: Vec::new(),
            buckets: Vec::new(),
        }
    }

    pub fn with_multi_color(mut self, token: &str, hues: &[f32]) -> Self {
        self.multi_color_token = token.to_string();
        self.multi_color_hues = hues.to_vec();
        self
    }

    pub fn targets(&self) -> &[TargetPoint] {
        &self.targets
    }

    /// Bucket index of each target, parallel to [`SlotAllocator::targets`]
    pub fn buckets(&self) -> &[usize] {
        &self.buckets
    }

    /// Recompute the target set; an empty mask yields no targets
    pub fn compute_targets<R: Rng>(
        &mut self,
        token: &str,
        mask: &Mask,
        desired: usize,
        frame: &ShapeFrame,
        rng: &mut R,
    ) -> &[TargetPoint] {
        self.targets.clear();
        self.buckets.clear();

        let pixels: Vec<(usize, usize)> = mask.on_pixels().collect();
        let Some(content) = ContentBox::around(&pixels) else {
            return &self.targets;
        };

        let bucket_count = token.chars().count().max(1);
        let mut buckets: Vec<Vec<(usize, usize)>> = vec![Vec::new(); bucket_count];
        for &pixel in &pixels {
            buckets[content.bucket_of(pixel.0, bucket_count)].push(pixel);
        }

        let palette: &[f32] = if token == self.multi_color_token {
            &self.multi_color_hues
        } else {
            &[]
        };

        let total = desired.min(pixels.len());
        let per_bucket = total / bucket_count;
        let remainder = total - per_bucket * bucket_count;

        let mut selected: Vec<((usize, usize), usize)> = Vec::with_capacity(total);
        for (i, bucket) in buckets.iter().enumerate() {
            let need = per_bucket + usize::from(i < remainder);
            if bucket.is_empty() || need == 0 {
                continue;
            }

            if bucket.len() >= need {
                for idx in index::sample(rng, bucket.len(), need) {
                    selected.push((bucket[idx], i));
                }
            } else {
                selected.extend(bucket.iter().map(|&pixel| (pixel, i)));
                for _ in bucket.len()..need {
                    selected.push((bucket[rng.gen_range(0..bucket.len())], i));
                }
            }
        }

        while selected.len() < total {
            let pixel = pixels[rng.gen_range(0..pixels.len())];
            selected.push((pixel, content.bucket_of(pixel.0, bucket_count)));
        }

        let scale = (frame.size.x / content.width).min(frame.size.y / content.height);
        let content_center = Vector2D::new(
            content.min_x + content.width * 0.5,
            content.min_y + content.height * 0.5,
        );

        let mut targets = Vec::with_capacity(selected.len());
        let mut target_buckets = Vec::with_capacity(selected.len());
        for ((x, y), bucket) in selected {
            let offset = Vector2D::new(x as f32, y as f32) - content_center;
            targets.push(TargetPoint {
                position: frame.center + offset * scale,
                hue: (!palette.is_empty()).then(|| palette[bucket % palette.len()]),
            });
            target_buckets.push(bucket);
        }
        self.targets = targets;
        self.buckets = target_buckets;

        log::debug!(
            "computed {} targets for '{}' from {} on-pixels across {} buckets",
            self.targets.len(),
            token,
            pixels.len(),
            bucket_count
        );

        &self.targets
    }
}

/// Tight bounds of the on-pixels; extents are floored at 1
#[derive(Debug, Clone, Copy)]
struct ContentBox {
    min_x: f32,
    min_y: f32,
    width: f32,
    height: f32,
}

impl ContentBox {
    fn around(pixels: &[(usize, usize)]) -> Option<Self> {
        let first = pixels.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.0, first.0, first.1, first.1);
        for &(x, y) in pixels {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Some(Self {
            min_x: min_x as f32,
            min_y: min_y as f32,
            width: ((max_x - min_x) as f32).max(1.0),
            height: ((max_y - min_y) as f32).max(1.0),
        })
    }

    fn bucket_of(&self, x: usize, bucket_count: usize) -> usize {
        let norm = (x as f32 - self.min_x) / self.width;
        ((norm * bucket_count as f32).floor() as usize).min(bucket_count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn solid(width: usize, height: usize) -> Mask {
        let mut mask = Mask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    fn frame() -> ShapeFrame {
        ShapeFrame {
            center: Vector2D::new(400.0, 300.0),
            size: Vector2D::new(200.0, 200.0),
        }
    }

    /// Inverse of the world mapping for a solid `size` x `size` mask at the origin
    fn pixel_of(point: &TargetPoint, size: usize) -> (usize, usize) {
        let extent = (size - 1) as f32;
        let scale = 200.0 / extent;
        let x = (point.position.x - 400.0) / scale + extent * 0.5;
        let y = (point.position.y - 300.0) / scale + extent * 0.5;
        (x.round() as usize, y.round() as usize)
    }

    #[test]
    fn test_empty_mask_yields_no_targets() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut allocator = SlotAllocator::new();
        let targets =
            allocator.compute_targets("LOVE", &Mask::new(30, 10), 250, &frame(), &mut rng);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_solid_square_capped_at_pixel_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut allocator = SlotAllocator::new();
        let targets = allocator
            .compute_targets("O", &solid(10, 10), 250, &frame(), &mut rng)
            .to_vec();

        assert_eq!(targets.len(), 100);
        let used: HashSet<_> = targets.iter().map(|t| pixel_of(t, 10)).collect();
        assert_eq!(used.len(), 100, "every pixel used exactly once");
    }

    #[test]
    fn test_short_bucket_resamples_with_replacement() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut allocator = SlotAllocator::new();
        // 10 wide, 3 letters: columns 0-2 | 3-5 | 6-9, so 30/30/40 pixels
        let targets = allocator
            .compute_targets("BOX", &solid(10, 10), 100, &frame(), &mut rng)
            .to_vec();
        assert_eq!(targets.len(), 100);

        let buckets = allocator.buckets();
        let first: Vec<_> = targets
            .iter()
            .zip(buckets)
            .filter(|(_, b)| **b == 0)
            .map(|(t, _)| pixel_of(t, 10))
            .collect();
        assert_eq!(first.len(), 34);
        let distinct: HashSet<_> = first.iter().collect();
        assert_eq!(distinct.len(), 30, "all 30 pixels plus 4 repeats");
    }

    #[test]
    fn test_remainder_goes_to_first_buckets() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut allocator = SlotAllocator::new();
        allocator.compute_targets("ABC", &solid(30, 30), 11, &frame(), &mut rng);

        let mut counts = [0usize; 3];
        for &bucket in allocator.buckets() {
            counts[bucket] += 1;
        }
        assert_eq!(counts, [4, 4, 3]);
    }

    #[test]
    fn test_point_count_is_min_of_desired_and_pixels() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut allocator = SlotAllocator::new();
        for (token, desired) in [("A", 5), ("LOVE", 250), ("SUNRAIL", 900), ("407", 2500)] {
            let mut mask = Mask::new(60, 20);
            for x in 0..60 {
                for y in 0..20 {
                    if (x * 7 + y * 3) % 5 == 0 {
                        mask.set(x, y, true);
                    }
                }
            }
            let on = mask.count_on();
            let targets = allocator.compute_targets(token, &mask, desired, &frame(), &mut rng);
            assert_eq!(targets.len(), desired.min(on), "token {}", token);
        }
    }

    #[test]
    fn test_buckets_follow_horizontal_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut allocator = SlotAllocator::new();
        allocator.compute_targets("MAGIC", &solid(50, 8), 180, &frame(), &mut rng);

        let targets = allocator.targets();
        let buckets = allocator.buckets();
        assert_eq!(targets.len(), buckets.len());
        for (target, &bucket) in targets.iter().zip(buckets) {
            for (other, &other_bucket) in targets.iter().zip(buckets) {
                if bucket < other_bucket {
                    assert!(target.position.x < other.position.x);
                }
            }
        }
    }

    #[test]
    fn test_skipped_bucket_is_topped_up() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut allocator = SlotAllocator::new();
        // Only the outer columns are lit, so the middle bucket is empty
        let mut mask = Mask::new(10, 10);
        for y in 0..10 {
            mask.set(0, y, true);
            mask.set(9, y, true);
        }
        let targets = allocator.compute_targets("ABC", &mask, 15, &frame(), &mut rng);
        assert_eq!(targets.len(), 15);
    }

    #[test]
    fn test_world_mapping_preserves_aspect_and_center() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut allocator = SlotAllocator::new();
        let mut mask = Mask::new(20, 5);
        mask.set(0, 2, true);
        mask.set(10, 2, true);
        let frame = ShapeFrame {
            center: Vector2D::new(100.0, 100.0),
            size: Vector2D::new(20.0, 20.0),
        };

        let mut xs: Vec<f32> = allocator
            .compute_targets("I", &mask, 2, &frame, &mut rng)
            .iter()
            .map(|t| t.position.x)
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![90.0, 110.0]);
        assert!(allocator.targets().iter().all(|t| t.position.y == 99.0));
    }

    #[test]
    fn test_multi_color_word_gets_bucket_hues() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut allocator = SlotAllocator::new();
        allocator.compute_targets("PRIDE", &solid(50, 10), 200, &frame(), &mut rng);
        for (target, &bucket) in allocator.targets().iter().zip(allocator.buckets()) {
            assert_eq!(target.hue, Some(MULTI_COLOR_HUES[bucket % 5]));
        }

        allocator.compute_targets("LOVE", &solid(50, 10), 200, &frame(), &mut rng);
        assert!(allocator.targets().iter().all(|t| t.hue.is_none()));
    }

    #[test]
    fn test_multi_color_palette_cycles() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut allocator = SlotAllocator::new().with_multi_color("RAINBOW", &[10.0, 20.0]);
        allocator.compute_targets("RAINBOW", &solid(70, 4), 140, &frame(), &mut rng);
        for (target, &bucket) in allocator.targets().iter().zip(allocator.buckets()) {
            let expected = if bucket % 2 == 0 { 10.0 } else { 20.0 };
            assert_eq!(target.hue, Some(expected));
        }
    }
}
