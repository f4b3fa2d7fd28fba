//! Display colors. Renderers ask a [`PaletteProvider`] for the color of a
//! particle hue given the active shape and time of day.

use core::fmt;

/// Hue (0-360), saturation (0-100), brightness (0-100)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub h: f32,
    pub s: f32,
    pub b: f32,
}

impl Hsb {
    pub const fn new(h: f32, s: f32, b: f32) -> Self {
        Self { h, s, b }
    }

    /// Convert to 8-bit RGB
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let v = (self.b / 100.0).clamp(0.0, 1.0);
        let h = self.h.rem_euclid(360.0) / 60.0;
        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        let to_byte = |channel: f32| ((channel + m) * 255.0).round() as u8;
        (to_byte(r), to_byte(g), to_byte(b))
    }
}

/// What a palette may look at besides the particle hue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteContext<'a> {
    pub shape: &'a str,
    /// Local hour, 0-23
    pub hour: u32,
}

pub trait PaletteProvider {
    fn color(&self, base_hue: f32, context: &PaletteContext) -> Hsb;
}

/// Fixed swatches indexed by the base hue's position on the color wheel
#[derive(Debug, Clone, Copy)]
pub struct SwatchPalette {
    swatches: &'static [Hsb],
}

pub const CAMO_SWATCHES: [Hsb; 4] = [
    Hsb::new(35.0, 50.0, 50.0),
    Hsb::new(90.0, 60.0, 45.0),
    Hsb::new(110.0, 55.0, 35.0),
    Hsb::new(25.0, 65.0, 35.0),
];

pub const ORLANDO_CITY_SWATCHES: [Hsb; 3] = [
    Hsb::new(275.0, 80.0, 95.0),
    Hsb::new(45.0, 100.0, 95.0),
    Hsb::new(0.0, 0.0, 100.0),
];

pub const MAGIC_SWATCHES: [Hsb; 4] = [
    Hsb::new(210.0, 100.0, 100.0),
    Hsb::new(0.0, 0.0, 0.0),
    Hsb::new(210.0, 20.0, 90.0),
    Hsb::new(0.0, 0.0, 100.0),
];

pub const UCF_SWATCHES: [Hsb; 3] = [
    Hsb::new(0.0, 0.0, 0.0),
    Hsb::new(45.0, 100.0, 100.0),
    Hsb::new(0.0, 0.0, 100.0),
];

impl SwatchPalette {
    pub const fn new(swatches: &'static [Hsb]) -> Self {
        Self { swatches }
    }

    pub fn camo() -> Self {
        Self::new(&CAMO_SWATCHES)
    }

    pub fn orlando_city() -> Self {
        Self::new(&ORLANDO_CITY_SWATCHES)
    }

    pub fn magic() -> Self {
        Self::new(&MAGIC_SWATCHES)
    }

    pub fn ucf() -> Self {
        Self::new(&UCF_SWATCHES)
    }
}

impl PaletteProvider for SwatchPalette {
    fn color(&self, base_hue: f32, _context: &PaletteContext) -> Hsb {
        if self.swatches.is_empty() {
            return Hsb::new(base_hue, 90.0, 96.0);
        }
        let len = self.swatches.len();
        let index = ((base_hue / 360.0 * len as f32).floor().max(0.0) as usize) % len;
        self.swatches[index]
    }
}

/// Red, blue or white by hue band
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagPalette;

impl PaletteProvider for FlagPalette {
    fn color(&self, base_hue: f32, _context: &PaletteContext) -> Hsb {
        if base_hue <= 60.0 {
            Hsb::new(0.0, 100.0, 96.0)
        } else if base_hue <= 240.0 {
            Hsb::new(220.0, 100.0, 92.0)
        } else {
            Hsb::new(0.0, 0.0, 100.0)
        }
    }
}

/// Forced time-of-day scheme, or the real clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeOverride {
    #[default]
    Auto,
    Midnight,
    Dawn,
    Noon,
    Dusk,
    Camo,
}

impl SchemeOverride {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(SchemeOverride::Auto),
            "midnight" => Some(SchemeOverride::Midnight),
            "dawn" => Some(SchemeOverride::Dawn),
            "noon" => Some(SchemeOverride::Noon),
            "dusk" => Some(SchemeOverride::Dusk),
            "camo" => Some(SchemeOverride::Camo),
            _ => None,
        }
    }

    fn forced_hour(&self) -> Option<u32> {
        match self {
            SchemeOverride::Midnight => Some(0),
            SchemeOverride::Dawn => Some(5),
            SchemeOverride::Noon => Some(12),
            SchemeOverride::Dusk => Some(18),
            SchemeOverride::Auto | SchemeOverride::Camo => None,
        }
    }
}

impl fmt::Display for SchemeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemeOverride::Auto => "AUTO",
            SchemeOverride::Midnight => "MIDNIGHT",
            SchemeOverride::Dawn => "DAWN",
            SchemeOverride::Noon => "NOON",
            SchemeOverride::Dusk => "DUSK",
            SchemeOverride::Camo => "CAMO",
        };
        f.write_str(name)
    }
}

/// Blends the base hue toward a mood color depending on the hour
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOfDayPalette {
    pub scheme: SchemeOverride,
}

impl PaletteProvider for TimeOfDayPalette {
    fn color(&self, base_hue: f32, context: &PaletteContext) -> Hsb {
        let hour = self.scheme.forced_hour().unwrap_or(context.hour);
        match hour {
            0 | 1 => Hsb::new(lerp(base_hue, 230.0, 0.7), 100.0, 92.0),
            5 | 6 => Hsb::new(lerp(base_hue, 35.0, 0.75), 70.0, 98.0),
            12 | 13 => Hsb::new(base_hue, 100.0, 100.0),
            18 | 19 => Hsb::new(lerp(base_hue, 310.0, 0.6), 90.0, 88.0),
            _ => Hsb::new(base_hue, 90.0, 96.0),
        }
    }
}

/// Per-shape palettes first, then the camo override, then time of day
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowPalette {
    pub scheme: SchemeOverride,
}

impl ShowPalette {
    pub fn new(scheme: SchemeOverride) -> Self {
        Self { scheme }
    }
}

impl PaletteProvider for ShowPalette {
    fn color(&self, base_hue: f32, context: &PaletteContext) -> Hsb {
        match context.shape {
            "FLAG" => return FlagPalette.color(base_hue, context),
            "UCF" => return SwatchPalette::ucf().color(base_hue, context),
            "VALOR" => return SwatchPalette::camo().color(base_hue, context),
            "VAMOS" => return SwatchPalette::orlando_city().color(base_hue, context),
            "MAGIC" => return SwatchPalette::magic().color(base_hue, context),
            _ => {}
        }

        if self.scheme == SchemeOverride::Camo {
            return SwatchPalette::camo().color(base_hue, context);
        }

        TimeOfDayPalette {
            scheme: self.scheme,
        }
        .color(base_hue, context)
    }
}

/// Gentle brightness shimmer applied at draw time
pub fn flicker(color: Hsb, base_hue: f32, frame: u64) -> Hsb {
    let b = color.b + 6.0 * (frame as f32 * 0.05 + base_hue * 0.01).sin();
    Hsb {
        b: b.clamp(0.0, 100.0),
        ..color
    }
}

/// Dot diameter for a particle moving at `speed`
pub fn dot_size(speed: f32, max_speed: f32, high_detail: bool) -> f32 {
    let base = if high_detail { 9.0 } else { 11.0 };
    base * crate::remap(speed, 0.0, max_speed.max(f32::EPSILON), 0.8, 1.4)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
