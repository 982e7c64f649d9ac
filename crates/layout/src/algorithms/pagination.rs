use tally_types::geometry::Rect;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Tolerance for accumulated float error when comparing heights.
pub const FIT_EPSILON: f32 = 0.01;

/// Checks whether a block of `child_height` still fits below `cursor_y`.
///
/// * `cursor_y`: position relative to the top of `bounds`.
/// * `child_height`: height the block needs.
/// * `bounds`: the content area of the current page.
pub fn check_child_fit(cursor_y: f32, child_height: f32, bounds: Rect) -> BreakAnalysis {
    let available = (bounds.height - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: child_height > available + FIT_EPSILON,
        remaining_height: available,
    }
}

/// A block that cannot fit even on an empty page.
pub fn exceeds_page(child_height: f32, bounds: Rect) -> bool {
    child_height > bounds.height + FIT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_does_not_break() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let analysis = check_child_fit(60.0, 40.0, bounds);
        assert!(!analysis.should_break);
        assert_eq!(analysis.remaining_height, 40.0);
        assert!(check_child_fit(60.0, 40.5, bounds).should_break);
    }

    #[test]
    fn oversize_detection() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!exceeds_page(100.0, bounds));
        assert!(exceeds_page(101.0, bounds));
    }
}
