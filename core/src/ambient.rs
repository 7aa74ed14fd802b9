use serde::{Deserialize, Serialize};

use crate::palette::{rgba, MATRIX_COLORS, MATRIX_GLYPHS, RAIN_GLYPHS};
use crate::random::{chance, pick, range, RandomSource};

pub const MATRIX_COLUMN_PX_DEFAULT: f64 = 20.0;
pub const MATRIX_COLUMN_PX_MIN: f64 = 1.0;
pub const MATRIX_COLUMNS_MAX: usize = 1_000;
pub const MATRIX_DENSITY_DEFAULT: f64 = 0.3;
pub const MATRIX_REFRESH_MS_DEFAULT: u32 = 12_000;
pub const STAR_COUNT_DEFAULT: usize = 50;
pub const STAR_COUNT_MAX: usize = 500;

pub const COSMIC_PARTICLE_COUNT: usize = 50;
pub const SHOOTING_STAR_COUNT: usize = 8;
pub const RAIN_DROP_COUNT: usize = 15;
const RAIN_COLUMN_PCT: f64 = 7.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixSettings {
    pub column_px: f64,
    pub density: f64,
    pub refresh_ms: u32,
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            column_px: MATRIX_COLUMN_PX_DEFAULT,
            density: MATRIX_DENSITY_DEFAULT,
            refresh_ms: MATRIX_REFRESH_MS_DEFAULT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationSettings {
    pub star_count: usize,
}

impl Default for ConstellationSettings {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT_DEFAULT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatrixGlyph {
    pub column: usize,
    pub left_px: f64,
    pub glyph: char,
    pub delay_s: f64,
    pub duration_s: f64,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub size_px: f64,
}

pub fn matrix_columns(viewport_width: f64, settings: &MatrixSettings) -> usize {
    let usable = |value: f64| value.is_finite() && value > 0.0;
    if !usable(viewport_width) || !usable(settings.column_px) {
        return 0;
    }
    let columns = (viewport_width / settings.column_px).floor();
    if columns >= MATRIX_COLUMNS_MAX as f64 {
        return MATRIX_COLUMNS_MAX;
    }
    columns as usize
}

/// Sparse falling glyphs, at most one per column.
pub fn matrix_rain<R: RandomSource + ?Sized>(
    rng: &mut R,
    viewport_width: f64,
    settings: &MatrixSettings,
) -> Vec<MatrixGlyph> {
    let glyphs: Vec<char> = MATRIX_GLYPHS.chars().collect();
    let mut out = Vec::new();
    for column in 0..matrix_columns(viewport_width, settings) {
        if !chance(rng, settings.density) {
            continue;
        }
        let glyph = pick(rng, &glyphs).copied().unwrap_or('0');
        let delay_s = range(rng, 0.0, 8.0);
        let duration_s = range(rng, 8.0, 12.0);
        let base = pick(rng, MATRIX_COLORS).copied().unwrap_or(MATRIX_COLORS[0]);
        let alpha = range(rng, 0.2, 0.6);
        out.push(MatrixGlyph {
            column,
            left_px: column as f64 * settings.column_px,
            glyph,
            delay_s,
            duration_s,
            color: rgba(base, alpha),
        });
    }
    out
}

pub fn constellation<R: RandomSource + ?Sized>(
    rng: &mut R,
    settings: &ConstellationSettings,
) -> Vec<Star> {
    (0..settings.star_count)
        .map(|_| Star {
            x: range(rng, 0.0, 100.0),
            y: range(rng, 0.0, 100.0),
            delay_s: range(rng, 0.0, 3.0),
            duration_s: range(rng, 2.0, 4.0),
            size_px: range(rng, 1.0, 3.0),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct CosmicParticle {
    pub x: f64,
    pub y: f64,
    pub size_px: f64,
    pub hue: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub glow_px: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
    pub x: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RainDrop {
    pub left_pct: f64,
    pub glyph: char,
    pub duration_s: f64,
    pub delay_s: f64,
}

/// Decorations drawn behind the loading screen. Generated once per mount.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoaderDecor {
    pub particles: Vec<CosmicParticle>,
    pub shooting_stars: Vec<ShootingStar>,
    pub rain: Vec<RainDrop>,
}

pub fn loader_decor<R: RandomSource + ?Sized>(rng: &mut R) -> LoaderDecor {
    let particles = (0..COSMIC_PARTICLE_COUNT)
        .map(|_| CosmicParticle {
            size_px: range(rng, 2.0, 6.0),
            x: range(rng, 0.0, 100.0),
            y: range(rng, 0.0, 100.0),
            hue: range(rng, 180.0, 360.0),
            duration_s: range(rng, 4.0, 10.0),
            delay_s: range(rng, 0.0, 3.0),
            glow_px: range(rng, 5.0, 20.0),
        })
        .collect();
    let shooting_stars = (0..SHOOTING_STAR_COUNT)
        .map(|_| ShootingStar {
            x: range(rng, 0.0, 100.0),
            duration_s: range(rng, 2.0, 5.0),
            delay_s: range(rng, 0.0, 4.0),
        })
        .collect();
    let rain = (0..RAIN_DROP_COUNT)
        .map(|index| RainDrop {
            left_pct: index as f64 * RAIN_COLUMN_PCT,
            duration_s: range(rng, 6.0, 10.0),
            delay_s: range(rng, 0.0, 3.0),
            glyph: pick(rng, RAIN_GLYPHS).copied().unwrap_or('0'),
        })
        .collect();
    LoaderDecor {
        particles,
        shooting_stars,
        rain,
    }
}
