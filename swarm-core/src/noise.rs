//! Smooth pseudo-random scalar field used for ambient wandering.

const OCTAVES: u32 = 4;
const FALLOFF: f32 = 0.5;

/// Seeded multi-octave 3D value noise in `[0, 1)`
#[derive(Debug, Clone, Copy)]
pub struct FlowField {
    seed: u32,
}

impl FlowField {
    pub fn new(seed: u64) -> Self {
        Self {
            seed: (seed ^ (seed >> 32)) as u32,
        }
    }

    pub fn sample(&self, x: f32, y: f32, t: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = 1.0;
        let mut norm = 0.0;

        for octave in 0..OCTAVES {
            let sample = self.value_noise(x * frequency, y * frequency, t * frequency, octave);
            total += amplitude * sample;
            norm += amplitude;
            amplitude *= FALLOFF;
            frequency *= 2.0;
        }

        (total / norm).clamp(0.0, 0.999_999)
    }

    fn value_noise(&self, x: f32, y: f32, z: f32, octave: u32) -> f32 {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;
        let zi = z.floor() as i32;

        let u = smoothstep(x - xi as f32);
        let v = smoothstep(y - yi as f32);
        let w = smoothstep(z - zi as f32);

        let salt = self.seed.wrapping_add(octave.wrapping_mul(0x9E37_79B9));
        let corner = |dx: i32, dy: i32, dz: i32| hash3(xi + dx, yi + dy, zi + dz, salt);

        let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), u);
        let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), u);
        let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), u);
        let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), u);

        let y0 = lerp(x00, x10, v);
        let y1 = lerp(x01, x11, v);
        lerp(y0, y1, w)
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn hash3(x: i32, y: i32, z: i32, seed: u32) -> f32 {
    let mut h = (x as u32).wrapping_mul(374_761_393)
        ^ (y as u32).wrapping_mul(668_265_263)
        ^ (z as u32).wrapping_mul(2_246_822_519)
        ^ seed.wrapping_mul(3_266_489_917);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    (h & 0x00FF_FFFF) as f32 / 0x0100_0000 as f32
}
