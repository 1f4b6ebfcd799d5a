use std::fmt;
#[cfg(test)]
use std::str::FromStr;

use palette::{IntoColor, Lch, Mix, Srgb};

/// Number of discrete stops each palette is expanded into.
pub const GRADIENT_STOPS: usize = 256;

/// Below this LCH chroma a color is treated as grey and takes its neighbour's hue.
const ACHROMATIC_CHROMA: f32 = 1e-2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteName {
    #[default]
    Red,
    Blue,
    Greyscale,
}

impl PaletteName {
    pub const ALL: [PaletteName; 3] = [PaletteName::Red, PaletteName::Blue, PaletteName::Greyscale];

    /// Key used in markup (`data-palette`) and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            PaletteName::Red => "red",
            PaletteName::Blue => "blue",
            PaletteName::Greyscale => "greyscale",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaletteName::Red => "Red",
            PaletteName::Blue => "Blue",
            PaletteName::Greyscale => "Greyscale",
        }
    }

    /// Anchor colors, low to high.
    pub fn anchors(self) -> &'static [[u8; 3]] {
        match self {
            PaletteName::Red => &[
                [0xF2, 0xF2, 0xF2],
                [0xF2, 0x95, 0x80],
                [0xF2, 0x2E, 0x2E],
                [0xBF, 0x17, 0x25],
                [0x73, 0x03, 0x18],
                [0x5A, 0x00, 0x00],
            ],
            PaletteName::Blue => &[
                [0xF5, 0xFB, 0xFF],
                [0x8C, 0xB4, 0xF0],
                [0x2E, 0x5F, 0xCE],
                [0x1A, 0x3D, 0x8C],
                [0x0A, 0x12, 0x4D],
            ],
            PaletteName::Greyscale => &[
                [0xFA, 0xFA, 0xFA],
                [0xC7, 0xC7, 0xC7],
                [0x90, 0x90, 0x90],
                [0x60, 0x60, 0x60],
                [0x33, 0x33, 0x33],
                [0x1A, 0x1A, 0x1A],
            ],
        }
    }

    pub fn gradient(self) -> Gradient {
        let anchors: Vec<Srgb<u8>> = self
            .anchors()
            .iter()
            .map(|&[r, g, b]| Srgb::new(r, g, b))
            .collect();
        Gradient::from_anchors(&anchors, GRADIENT_STOPS)
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
impl FromStr for PaletteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteName::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown palette: {s}"))
    }
}

/// A palette expanded into evenly spaced sRGB stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<Srgb<u8>>,
}

impl Gradient {
    /// Sample `len` evenly spaced colors from `anchors`, interpolating between
    /// neighbouring anchors in LCH along the shorter hue arc.
    pub fn from_anchors(anchors: &[Srgb<u8>], len: usize) -> Self {
        let lch: Vec<Lch> = anchors
            .iter()
            .map(|c| c.into_format::<f32>().into_color())
            .collect();
        let stops = (0..len)
            .map(|i| {
                let t = if len > 1 { i as f32 / (len - 1) as f32 } else { 0.0 };
                lch_at(&lch, t)
            })
            .collect();
        Self { stops }
    }

    pub fn stops(&self) -> &[Srgb<u8>] {
        &self.stops
    }

    /// Color at `t` in [0, 1], linear in sRGB between the two nearest stops.
    /// Out-of-range positions clamp to the ends; NaN reads as 0.
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let Some(last) = self.stops.len().checked_sub(1) else {
            return [0, 0, 0];
        };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * last as f64;
        let lower = (pos.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let factor = (pos - lower as f64) as f32;

        let a = self.stops[lower].into_format::<f32>();
        let b = self.stops[upper].into_format::<f32>();
        let mixed: Srgb<u8> = a.mix(b, factor).into_format();
        [mixed.red, mixed.green, mixed.blue]
    }

    /// CSS background running from the lowest value at the bottom to the highest at the top.
    pub fn css_linear_gradient(&self) -> String {
        let stops: Vec<String> = self.stops.iter().map(|c| hex(*c)).collect();
        format!("linear-gradient(to top, {})", stops.join(", "))
    }
}

fn hex(c: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

fn lch_at(anchors: &[Lch], t: f32) -> Srgb<u8> {
    let Some(segments) = anchors.len().checked_sub(1) else {
        return Srgb::new(0, 0, 0);
    };
    let color = if segments == 0 {
        anchors[0]
    } else {
        let pos = t.clamp(0.0, 1.0) * segments as f32;
        let index = (pos.floor() as usize).min(segments - 1);
        let (mut from, mut to) = (anchors[index], anchors[index + 1]);
        // Grey has no meaningful hue; borrow the other end's so the blend
        // doesn't sweep through unrelated hues.
        if from.chroma < ACHROMATIC_CHROMA {
            from.hue = to.hue;
        }
        if to.chroma < ACHROMATIC_CHROMA {
            to.hue = from.hue;
        }
        from.mix(to, pos - index as f32)
    };
    let rgb: Srgb = color.into_color();
    rgb.into_format()
}

/// The gradient of every palette, expanded once.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSet {
    gradients: Vec<(PaletteName, Gradient)>,
}

impl GradientSet {
    pub fn new() -> Self {
        Self {
            gradients: PaletteName::ALL.into_iter().map(|p| (p, p.gradient())).collect(),
        }
    }

    pub fn get(&self, palette: PaletteName) -> &Gradient {
        self.gradients
            .iter()
            .find(|(p, _)| *p == palette)
            .map(|(_, g)| g)
            .unwrap_or(&self.gradients[0].1)
    }
}

impl Default for GradientSet {
    fn default() -> Self {
        Self::new()
    }
}
