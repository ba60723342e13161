//! Qualitative color palette for per-day lines.
//!
//! Colors come from the 8-entry "Dark2" palette. A palette of `n` colors is
//! sampled at `n` evenly spaced points over `[0, 1]`, each point mapped to
//! entry `min(floor(x * 8), 7)`. Up to 8 days therefore get distinct colors;
//! beyond that, colors repeat.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    /// CSS hex form, e.g. `#1b9e77`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const DARK2: [Rgb; 8] = [
    Rgb::new(27, 158, 119),
    Rgb::new(217, 95, 2),
    Rgb::new(117, 112, 179),
    Rgb::new(231, 41, 138),
    Rgb::new(102, 166, 30),
    Rgb::new(230, 171, 2),
    Rgb::new(166, 118, 29),
    Rgb::new(102, 102, 102),
];

/// Colors for `count` lines, in assignment order.
pub fn sample_palette(count: usize) -> Vec<Rgb> {
    let size = DARK2.len();
    match count {
        0 => Vec::new(),
        1 => vec![DARK2[0]],
        _ => {
            let step = 1.0 / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    let x = if i == count - 1 { 1.0 } else { i as f64 * step };
                    let scaled = x * size as f64;
                    let index = if scaled >= size as f64 {
                        size - 1
                    } else {
                        scaled.max(0.0) as usize
                    };
                    DARK2[index]
                })
                .collect()
        }
    }
}
