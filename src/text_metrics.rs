use std::collections::HashMap;
use std::sync::Mutex;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use ttf_parser::Face;

/// Measured extent of a string, in canvas-normalized units: width and height
/// are fractions of the canvas width and height respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Text-measurement capability supplied to the planner. The contract is
/// determinism: a fixed (text, font size, canvas) triple must always measure
/// to the same size, so a plan can be recomputed byte-for-byte.
pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f32) -> TextSize;
}

/// Deterministic measurer backed by a per-character width table calibrated
/// against a common sans-serif stack. Needs no font files, which makes it the
/// offline/test implementation and the fallback when no face resolves.
#[derive(Debug, Clone)]
pub struct CharTableMetrics {
    canvas_width: f32,
    canvas_height: f32,
    line_height: f32,
}

impl CharTableMetrics {
    pub fn new(canvas_width: f32, canvas_height: f32, line_height: f32) -> Self {
        Self {
            canvas_width: canvas_width.max(1.0),
            canvas_height: canvas_height.max(1.0),
            line_height,
        }
    }
}

impl TextMetrics for CharTableMetrics {
    fn measure(&self, text: &str, font_size: f32) -> TextSize {
        measure_lines(text, font_size, self.line_height, |line| {
            line.chars().map(char_width_factor).sum::<f32>() * font_size
        })
        .normalized(self.canvas_width, self.canvas_height)
    }
}

/// Measurer backed by real font files resolved through the system database.
/// ASCII advances are cached per family; characters without a glyph fall back
/// to the calibrated table so mixed text still measures monotonically.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    family: String,
    canvas_width: f32,
    canvas_height: f32,
    line_height: f32,
}

impl FontMetrics {
    pub fn new(family: &str, canvas_width: f32, canvas_height: f32, line_height: f32) -> Self {
        Self {
            family: family.to_string(),
            canvas_width: canvas_width.max(1.0),
            canvas_height: canvas_height.max(1.0),
            line_height,
        }
    }
}

impl TextMetrics for FontMetrics {
    fn measure(&self, text: &str, font_size: f32) -> TextSize {
        let advances = lookup_family(&self.family);
        measure_lines(text, font_size, self.line_height, |line| {
            line.chars()
                .map(|ch| match advances.as_ref().and_then(|a| a.em_advance(ch)) {
                    Some(em) => em * font_size,
                    None => char_width_factor(ch) * font_size,
                })
                .sum()
        })
        .normalized(self.canvas_width, self.canvas_height)
    }
}

struct PixelSize {
    width: f32,
    height: f32,
}

impl PixelSize {
    fn normalized(self, canvas_width: f32, canvas_height: f32) -> TextSize {
        TextSize {
            width: self.width / canvas_width,
            height: self.height / canvas_height,
        }
    }
}

fn measure_lines(
    text: &str,
    font_size: f32,
    line_height: f32,
    line_width: impl Fn(&str) -> f32,
) -> PixelSize {
    if text.is_empty() || font_size <= 0.0 {
        return PixelSize {
            width: 0.0,
            height: 0.0,
        };
    }
    let mut lines = 0usize;
    let mut width = 0.0f32;
    for line in text.split('\n') {
        lines += 1;
        width = width.max(line_width(line));
    }
    PixelSize {
        width,
        height: lines as f32 * font_size * line_height,
    }
}

/// Advance widths in em units for the printable ASCII range of one face.
struct FaceAdvances {
    ascii: [f32; 128],
}

impl FaceAdvances {
    fn from_face(face: &Face<'_>) -> Self {
        let units_per_em = face.units_per_em().max(1) as f32;
        let mut ascii = [0.0f32; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                let advance = face.glyph_hor_advance(glyph).unwrap_or(0);
                ascii[byte as usize] = advance as f32 / units_per_em;
            }
        }
        Self { ascii }
    }

    fn em_advance(&self, ch: char) -> Option<f32> {
        let idx = ch as usize;
        if idx < 128 && self.ascii[idx] > 0.0 {
            Some(self.ascii[idx])
        } else {
            None
        }
    }
}

struct FaceCache {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<std::sync::Arc<FaceAdvances>>>,
}

static FACE_CACHE: Lazy<Mutex<FaceCache>> = Lazy::new(|| {
    Mutex::new(FaceCache {
        db: Database::new(),
        loaded_system_fonts: false,
        faces: HashMap::new(),
    })
});

fn lookup_family(family: &str) -> Option<std::sync::Arc<FaceAdvances>> {
    let key = family.trim().to_ascii_lowercase();
    let mut cache = FACE_CACHE.lock().ok()?;
    if let Some(cached) = cache.faces.get(&key) {
        return cached.clone();
    }
    let loaded = load_face(&mut cache, family);
    cache.faces.insert(key, loaded.clone());
    loaded
}

fn load_face(cache: &mut FaceCache, family: &str) -> Option<std::sync::Arc<FaceAdvances>> {
    if !cache.loaded_system_fonts {
        cache.db.load_system_fonts();
        cache.loaded_system_fonts = true;
    }

    let names: Vec<String> = family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|part| !part.is_empty())
        .collect();
    let mut families: Vec<Family<'_>> = Vec::with_capacity(names.len() + 1);
    for name in &names {
        match name.to_ascii_lowercase().as_str() {
            "serif" => families.push(Family::Serif),
            "sans-serif" | "system-ui" | "-apple-system" => families.push(Family::SansSerif),
            "monospace" | "ui-monospace" => families.push(Family::Monospace),
            "cursive" => families.push(Family::Cursive),
            "fantasy" => families.push(Family::Fantasy),
            _ => families.push(Family::Name(name.as_str())),
        }
    }
    families.push(Family::SansSerif);

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = cache.db.query(&query)?;
    let mut loaded = None;
    cache.db.with_face_data(id, |data, index| {
        if let Ok(face) = Face::parse(data, index) {
            loaded = Some(std::sync::Arc::new(FaceAdvances::from_face(&face)));
        }
    });
    loaded
}

/// Per-character width factors (multiples of the font size) calibrated
/// against a common sans-serif stack at a 16px baseline.
pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '\\' | '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        'A' => 0.652,
        'B' => 0.648,
        'C' => 0.734,
        'D' => 0.723,
        'E' => 0.594,
        'F' => 0.575,
        'G' | 'H' => 0.742,
        'I' => 0.272,
        'J' => 0.557,
        'K' => 0.648,
        'L' => 0.559,
        'M' => 0.903,
        'N' => 0.763,
        'O' => 0.754,
        'P' => 0.623,
        'Q' => 0.755,
        'R' => 0.637,
        'S' => 0.633,
        'T' => 0.599,
        'U' => 0.746,
        'V' => 0.661,
        'W' => 0.958,
        'X' => 0.655,
        'Y' => 0.646,
        'Z' => 0.621,
        'a' => 0.550,
        'b' => 0.603,
        'c' => 0.547,
        'd' => 0.609,
        'e' => 0.570,
        'f' => 0.340,
        'g' | 'h' => 0.600,
        'i' => 0.235,
        'j' => 0.227,
        'k' => 0.522,
        'l' => 0.239,
        'm' => 0.867,
        'n' => 0.585,
        'o' => 0.574,
        'p' => 0.595,
        'q' => 0.585,
        'r' => 0.364,
        's' => 0.523,
        't' => 0.305,
        'u' => 0.585,
        'v' => 0.545,
        'w' => 0.811,
        'x' => 0.538,
        'y' => 0.556,
        'z' => 0.550,
        '0' => 0.613,
        '1' => 0.396,
        '2' => 0.609,
        '3' => 0.597,
        '4' => 0.614,
        '5' => 0.586,
        '6' => 0.608,
        '7' => 0.559,
        '8' => 0.611,
        '9' => 0.595,
        '@' | '#' | '%' | '&' => 0.946,
        _ => 0.568,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_width_factor_returns_positive_values() {
        for ch in ['a', 'Z', ' ', '0', '@', '\u{4e2d}'] {
            assert!(char_width_factor(ch) > 0.0, "char {:?} has zero width", ch);
        }
    }

    #[test]
    fn empty_text_measures_zero() {
        let metrics = CharTableMetrics::new(1000.0, 800.0, 1.15);
        let size = metrics.measure("", 10.0);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 0.0);
    }

    #[test]
    fn width_scales_with_font_size() {
        let metrics = CharTableMetrics::new(1000.0, 800.0, 1.15);
        let small = metrics.measure("Hello", 8.0);
        let large = metrics.measure("Hello", 16.0);
        assert!((large.width - small.width * 2.0).abs() < 1e-6);
    }

    #[test]
    fn multiline_text_takes_widest_line_and_stacks_height() {
        let metrics = CharTableMetrics::new(1000.0, 800.0, 1.15);
        let one = metrics.measure("wide wide wide", 10.0);
        let two = metrics.measure("wide wide wide\nx", 10.0);
        assert_eq!(two.width, one.width);
        assert!((two.height - one.height * 2.0).abs() < 1e-6);
    }

    #[test]
    fn measurement_is_deterministic() {
        let metrics = CharTableMetrics::new(1000.0, 800.0, 1.15);
        let a = metrics.measure("Tumor grade", 9.0);
        let b = metrics.measure("Tumor grade", 9.0);
        assert_eq!(a, b);
    }
}
