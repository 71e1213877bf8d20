//! Visual configuration for rendering.
//!
//! Cosmetic constants (sizes, reservations, the category accent palette)
//! live here as data so the screen and export renderers share one
//! parameterized implementation instead of per-surface variants.

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Components scaled to `0.0..=1.0` for PDF fill operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Accent color pairs keyed by critique category.
///
/// Titles that do not match a known category fall back to the last resort
/// pair. Matching is forgiving: exact title first, then containment in
/// either direction against the title's leading words.
const CATEGORY_ACCENTS: &[(&str, Rgb, Rgb)] = &[
    ("Art Style", Rgb::new(0xF9, 0xC8, 0xC2), Rgb::new(0xF9, 0xE1, 0xC2)),
    ("Overall Feedback", Rgb::new(0xF9, 0xD2, 0xC2), Rgb::new(0xFD, 0xF2, 0xC2)),
    ("Composition", Rgb::new(0xF9, 0xDA, 0xC2), Rgb::new(0xFB, 0xEB, 0xC2)),
    ("Anatomy", Rgb::new(0xF9, 0xD5, 0xC2), Rgb::new(0xFA, 0xE5, 0xC2)),
    ("Proportion", Rgb::new(0xF9, 0xD5, 0xC2), Rgb::new(0xFA, 0xE5, 0xC2)),
    ("Perspective", Rgb::new(0xF9, 0xD5, 0xC2), Rgb::new(0xFA, 0xE5, 0xC2)),
    ("Line Work", Rgb::new(0xFA, 0xE5, 0xC2), Rgb::new(0xFE, 0xF8, 0xD2)),
    ("Detailing", Rgb::new(0xFA, 0xE5, 0xC2), Rgb::new(0xFE, 0xF8, 0xD2)),
    ("Coloring", Rgb::new(0xF9, 0xCD, 0xC2), Rgb::new(0xFB, 0xE0, 0xC2)),
    ("Shading", Rgb::new(0xF9, 0xCD, 0xC2), Rgb::new(0xFB, 0xE0, 0xC2)),
    ("Lighting", Rgb::new(0xF9, 0xCD, 0xC2), Rgb::new(0xFB, 0xE0, 0xC2)),
    ("Creativity", Rgb::new(0xF2, 0xD4, 0xE9), Rgb::new(0xE5, 0xD9, 0xF2)),
    ("Expression", Rgb::new(0xF2, 0xD4, 0xE9), Rgb::new(0xE5, 0xD9, 0xF2)),
    ("Suggested Next Steps", Rgb::new(0xC2, 0xEF, 0xEA), Rgb::new(0xD4, 0xF0, 0xD4)),
];

const FALLBACK_ACCENT: (Rgb, Rgb) = (Rgb::new(0x84, 0x5E, 0xC2), Rgb::new(0xD5, 0xCA, 0xEB));

/// Look up the accent pair (primary, secondary) for a section title.
pub fn accent_for(title: &str) -> (Rgb, Rgb) {
    if let Some((_, primary, secondary)) = CATEGORY_ACCENTS.iter().find(|(name, _, _)| *name == title)
    {
        return (*primary, *secondary);
    }

    let lead: Vec<&str> = title.split_whitespace().take(2).collect();
    let lead = lead.join(" ");

    for (name, primary, secondary) in CATEGORY_ACCENTS {
        if title.contains(name) || (!lead.is_empty() && name.contains(lead.as_str())) {
            return (*primary, *secondary);
        }
    }

    FALLBACK_ACCENT
}

/// Typography and spacing configuration for the export renderer.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Title block font size in points.
    pub title_size: f32,

    /// Section heading font size.
    pub heading_size: f32,

    /// Subsection heading font size.
    pub subheading_size: f32,

    /// Body text font size.
    pub body_size: f32,

    /// Footer font size.
    pub footer_size: f32,

    /// Line-height multiple applied to font sizes.
    pub line_height: f32,

    /// Fixed vertical reservation for a section heading.
    pub heading_reserve: f32,

    /// Fixed vertical reservation for a subsection heading.
    pub subheading_reserve: f32,

    /// Fixed vertical reservation for a highlighted callout.
    pub callout_reserve: f32,

    /// Fixed vertical reservation for a plain paragraph or list line.
    pub paragraph_reserve: f32,

    /// Inner padding of the callout box.
    pub callout_padding: f32,

    /// Indent applied to list-item text (bullet drawn in the gap).
    pub bullet_indent: f32,

    /// Render the lead section's free paragraphs as highlighted callouts.
    pub highlight_lead: bool,
}

impl Theme {
    /// Create a theme with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Body line advance in points.
    pub fn body_line(&self) -> f32 {
        self.body_size * self.line_height
    }

    /// Heading line advance in points.
    pub fn heading_line(&self) -> f32 {
        self.heading_size * self.line_height
    }

    /// Subheading line advance in points.
    pub fn subheading_line(&self) -> f32 {
        self.subheading_size * self.line_height
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_size: 22.0,
            heading_size: 14.0,
            subheading_size: 11.5,
            body_size: 10.5,
            footer_size: 9.0,
            line_height: 1.4,
            heading_reserve: 26.0,
            subheading_reserve: 20.0,
            callout_reserve: 30.0,
            paragraph_reserve: 15.0,
            callout_padding: 8.0,
            bullet_indent: 14.0,
            highlight_lead: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::new(0xF9, 0xC8, 0xC2).to_hex(), "#F9C8C2");
    }

    #[test]
    fn test_accent_exact_match() {
        let (primary, _) = accent_for("Art Style");
        assert_eq!(primary, Rgb::new(0xF9, 0xC8, 0xC2));
    }

    #[test]
    fn test_accent_containment_match() {
        // "Coloring / Shading / Lighting" contains "Coloring".
        let (primary, _) = accent_for("Coloring / Shading / Lighting");
        assert_eq!(primary, Rgb::new(0xF9, 0xCD, 0xC2));
    }

    #[test]
    fn test_accent_fallback() {
        let (primary, secondary) = accent_for("Something Unrecognized");
        assert_eq!(primary, Rgb::new(0x84, 0x5E, 0xC2));
        assert_eq!(secondary, Rgb::new(0xD5, 0xCA, 0xEB));
    }

    #[test]
    fn test_theme_line_advances() {
        let theme = Theme::default();
        assert!(theme.body_line() > theme.body_size);
        assert!(theme.heading_line() > theme.body_line());
    }
}
