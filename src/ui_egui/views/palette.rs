//! Instructor color coding for grid cells and list rows.

use std::collections::HashMap;

use egui::Color32;

use crate::models::block::Block;

pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Configured instructor-to-color mapping.
pub struct InstructorPalette {
    colors: HashMap<String, Color32>,
}

impl InstructorPalette {
    pub fn from_config(palette: &HashMap<String, String>) -> Self {
        let colors = palette
            .iter()
            .filter_map(|(name, hex)| parse_color(hex).map(|c| (name.trim().to_string(), c)))
            .collect();
        Self { colors }
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.colors.keys().map(|s| s.as_str())
    }

    pub fn color_for_name(&self, name: &str) -> Option<Color32> {
        self.colors.get(name.trim()).copied()
    }

    /// Cell background for a block: the instructor field when set, otherwise
    /// the instructor inferred from the display text.
    pub fn color_for_block(&self, block: &Block) -> Option<Color32> {
        let instructor = block.instructor.trim();
        if !instructor.is_empty() {
            if let Some(color) = self.color_for_name(instructor) {
                return Some(color);
            }
        }
        let inferred = infer_instructor(&block.display_text(), self);
        inferred.and_then(|name| self.color_for_name(&name))
    }
}

/// Best-effort instructor name from a display label.
///
/// Labels composed from structured fields read "group · instructor · ...",
/// so the second dot-separated part wins; otherwise any configured name
/// appearing in the text does.
pub fn infer_instructor(text: &str, palette: &InstructorPalette) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let parts: Vec<&str> = text
        .split('·')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() >= 2 {
        return Some(parts[1].to_string());
    }

    let lowered = text.to_lowercase();
    palette
        .names()
        .find(|name| lowered.contains(&name.to_lowercase()))
        .map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::day::Day;

    fn palette() -> InstructorPalette {
        let mut config = HashMap::new();
        config.insert("Riley".to_string(), "#FFD6E7".to_string());
        config.insert("Jordan".to_string(), "#D6EFFF".to_string());
        InstructorPalette::from_config(&config)
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF5500"), Some(Color32::from_rgb(255, 85, 0)));
        assert_eq!(parse_color("00FF00"), Some(Color32::from_rgb(0, 255, 0)));
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_color_from_instructor_field() {
        let mut block = Block::new(Day::Monday, 0, 600, 630).unwrap();
        block.instructor = "Riley".to_string();
        assert_eq!(
            palette().color_for_block(&block),
            Some(Color32::from_rgb(0xFF, 0xD6, 0xE7))
        );
    }

    #[test]
    fn test_color_inferred_from_text() {
        let mut block = Block::new(Day::Monday, 0, 600, 630).unwrap();
        block.text = "Choir A · Jordan · Online".to_string();
        assert_eq!(
            palette().color_for_block(&block),
            Some(Color32::from_rgb(0xD6, 0xEF, 0xFF))
        );
    }

    #[test]
    fn test_infer_by_substring_when_single_part() {
        let p = palette();
        assert_eq!(
            infer_instructor("Warmup with riley", &p),
            Some("Riley".to_string())
        );
        assert_eq!(infer_instructor("Unknown text", &p), None);
        assert_eq!(infer_instructor("", &p), None);
    }

    #[test]
    fn test_unconfigured_instructor_has_no_color() {
        let mut block = Block::new(Day::Monday, 0, 600, 630).unwrap();
        block.instructor = "Casey".to_string();
        assert_eq!(palette().color_for_block(&block), None);
    }
}
