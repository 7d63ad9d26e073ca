use std::str::FromStr;

use palette::{Mix, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color parsing: style string → RGBColor
// ---------------------------------------------------------------------------

/// The matplotlib "tab10" names used by the default styles.
const TAB10: [(&str, &str); 10] = [
    ("tab:blue", "#1f77b4"),
    ("tab:orange", "#ff7f0e"),
    ("tab:green", "#2ca02c"),
    ("tab:red", "#d62728"),
    ("tab:purple", "#9467bd"),
    ("tab:brown", "#8c564b"),
    ("tab:pink", "#e377c2"),
    ("tab:gray", "#7f7f7f"),
    ("tab:olive", "#bcbd22"),
    ("tab:cyan", "#17becf"),
];

/// Parse a style color.
///
/// Accepts `#rrggbb` / `#rgb` hex, the `tab:*` names, and SVG/CSS color names
/// such as `lightgray` or `white`.
pub fn parse_color(spec: &str) -> Result<RGBColor, String> {
    let spec = spec.trim();
    let hex = TAB10
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(spec))
        .map_or(spec, |(_, hex)| *hex);

    let rgb: Srgb<u8> = if hex.starts_with('#') {
        Srgb::from_str(hex).map_err(|e| format!("invalid hex color '{spec}': {e}"))?
    } else {
        palette::named::from_str(&hex.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown color name '{spec}'"))?
    };
    Ok(RGBColor(rgb.red, rgb.green, rgb.blue))
}

/// `color` drawn at `opacity` over an opaque `background`, as one solid color.
///
/// `opacity` is clamped to `[0, 1]`; blending happens on sRGB components.
pub fn blend_over(color: RGBColor, opacity: f64, background: RGBColor) -> RGBColor {
    let to_float = |c: RGBColor| Srgb::new(c.0, c.1, c.2).into_format::<f32>();
    let mixed: Srgb<u8> = to_float(background)
        .mix(to_float(color), opacity as f32)
        .into_format();
    RGBColor(mixed.red, mixed.green, mixed.blue)
}

// ---------------------------------------------------------------------------
// ColorCycle: category index → RGBColor
// ---------------------------------------------------------------------------

/// A fixed list of colors handed out in order, wrapping around when there are
/// more categories than colors.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    colors: Vec<RGBColor>,
    default_color: RGBColor,
}

impl ColorCycle {
    /// Parse every entry of `specs`; fails on the first invalid color.
    pub fn new<S: AsRef<str>>(specs: &[S]) -> Result<Self, String> {
        let colors = specs
            .iter()
            .map(|s| parse_color(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ColorCycle {
            colors,
            default_color: RGBColor(128, 128, 128),
        })
    }

    /// Color for the `index`-th category.
    pub fn color_at(&self, index: usize) -> RGBColor {
        if self.colors.is_empty() {
            return self.default_color;
        }
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_tab_and_named_colors() {
        assert_eq!(parse_color("#1f77b4").unwrap(), RGBColor(0x1f, 0x77, 0xb4));
        assert_eq!(parse_color("tab:orange").unwrap(), RGBColor(0xff, 0x7f, 0x0e));
        assert_eq!(parse_color("lightgray").unwrap(), RGBColor(211, 211, 211));
        assert_eq!(parse_color("White").unwrap(), RGBColor(255, 255, 255));
    }

    #[test]
    fn rejects_unknown_colors() {
        assert!(parse_color("not-a-color").is_err());
        assert!(parse_color("#12345z").is_err());
    }

    #[test]
    fn blending_over_white_lightens() {
        let gray = RGBColor(211, 211, 211);
        let white = RGBColor(255, 255, 255);
        assert_eq!(blend_over(gray, 1.0, white), gray);
        assert_eq!(blend_over(gray, 0.0, white), white);
        assert_eq!(blend_over(gray, 2.0, white), gray);

        let RGBColor(r, g, b) = blend_over(gray, 0.8, white);
        assert_eq!((r, g, b), (r, r, r));
        assert!((219..=220).contains(&r), "got {r}");
    }

    #[test]
    fn cycle_wraps_around() {
        let cycle = ColorCycle::new(&["tab:blue", "tab:orange", "tab:green"]).unwrap();
        assert_eq!(cycle.len(), 3);
        assert_eq!(cycle.color_at(3), cycle.color_at(0));
        assert_eq!(cycle.color_at(4), RGBColor(0xff, 0x7f, 0x0e));
    }

    #[test]
    fn empty_cycle_falls_back_to_gray() {
        let cycle = ColorCycle::new::<&str>(&[]).unwrap();
        assert!(cycle.is_empty());
        assert_eq!(cycle.color_at(7), RGBColor(128, 128, 128));
    }
}
