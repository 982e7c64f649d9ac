use crate::font::{BuiltinFont, FontStyle, FontWeight};
use crate::metrics;
use serde::{Deserialize, Serialize};
use tally_types::Color;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

/// A fully resolved run style, ready for measuring and drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: Color,
    /// Distance between consecutive baselines, in points.
    pub line_height: f32,
    pub decoration: TextDecoration,
}

impl TextStyle {
    pub fn new(font_size: f32, color: Color) -> Self {
        Self {
            font_size,
            font_weight: FontWeight::Regular,
            font_style: FontStyle::Normal,
            color,
            line_height: font_size * 1.2,
            decoration: TextDecoration::None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    pub fn regular(mut self) -> Self {
        self.font_weight = FontWeight::Regular;
        self
    }

    pub fn oblique(mut self) -> Self {
        self.font_style = FontStyle::Oblique;
        self
    }

    pub fn underline(mut self) -> Self {
        self.decoration = TextDecoration::Underline;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn font(&self) -> BuiltinFont {
        BuiltinFont::resolve(self.font_weight, self.font_style)
    }

    pub fn measure(&self, text: &str) -> f32 {
        metrics::text_width(text, self.font(), self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_compose() {
        let style = TextStyle::new(10.0, Color::BLACK).bold().oblique().underline();
        assert_eq!(style.font(), BuiltinFont::HelveticaBoldOblique);
        assert_eq!(style.decoration, TextDecoration::Underline);
        assert!((style.line_height - 12.0).abs() < 1e-4);
        assert_eq!(style.regular().font(), BuiltinFont::HelveticaOblique);
    }
}
