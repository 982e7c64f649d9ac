//! Page-space geometry in points, origin at the top-left corner.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Width and height bounds handed down from a parent node when measuring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl BoxConstraints {
    /// Fixed width, unbounded height. Stacked nodes are always measured this way.
    pub fn tight_width(width: f32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: 0.0,
            max_height: f32::INFINITY,
        }
    }

    pub fn constrain(self, size: Size) -> Size {
        Size {
            width: size.width.clamp(self.min_width, self.max_width),
            height: size.height.clamp(self.min_height, self.max_height),
        }
    }

    /// Shrinks the width bounds by `amount` (padding, indentation).
    pub fn deflate_width(self, amount: f32) -> Self {
        Self {
            min_width: (self.min_width - amount).max(0.0),
            max_width: (self.max_width - amount).max(0.0),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deflate_never_goes_negative() {
        let c = BoxConstraints::tight_width(10.0).deflate_width(25.0);
        assert_eq!(c.max_width, 0.0);
        assert_eq!(c.min_width, 0.0);
        assert!(c.max_height.is_infinite());
    }

    #[test]
    fn constrain_clamps_to_bounds() {
        let c = BoxConstraints {
            min_height: 20.0,
            ..BoxConstraints::tight_width(100.0)
        };
        assert_eq!(c.constrain(Size::new(200.0, 5.0)), Size::new(100.0, 20.0));
    }
}
