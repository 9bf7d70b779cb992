/// Points per inch, the PDF user-space unit.
pub const POINTS_PER_INCH: f32 = 72.0;
/// Points per centimetre.
pub const POINTS_PER_CM: f32 = POINTS_PER_INCH / 2.54;

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

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
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

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// ISO A4 portrait in points.
    pub fn a4() -> Self {
        Self::new(595.28, 841.89)
    }

    /// Shrinks both sides by one ratio so the result fits inside `bounds`.
    /// Sizes that already fit are returned unchanged.
    pub fn fit_within(self, bounds: Size) -> Size {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Size::zero();
        }
        let ratio = (bounds.width / self.width)
            .min(bounds.height / self.height)
            .min(1.0);
        Size::new(self.width * ratio, self.height * ratio)
    }
}

/// Page margins, top/right/bottom/left, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// A page size together with its margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub size: Size,
    pub margins: Margins,
}

impl PageGeometry {
    /// The content area in top-left-origin coordinates.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.size.width - self.margins.left - self.margins.right,
            self.size.height - self.margins.top - self.margins.bottom,
        )
    }
}

impl Default for PageGeometry {
    /// A4 portrait with 2.2 cm side margins and 2 cm top and bottom margins.
    fn default() -> Self {
        Self {
            size: Size::a4(),
            margins: Margins::symmetric(2.0 * POINTS_PER_CM, 2.2 * POINTS_PER_CM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_within_keeps_aspect_ratio() {
        let fitted = Size::new(1000.0, 500.0).fit_within(Size::new(400.0, 400.0));
        assert!((fitted.width - 400.0).abs() < 0.001);
        assert!((fitted.height - 200.0).abs() < 0.001);
    }

    #[test]
    fn fit_within_never_enlarges() {
        let size = Size::new(100.0, 50.0);
        assert_eq!(size.fit_within(Size::new(400.0, 400.0)), size);
    }

    #[test]
    fn fit_within_height_bound() {
        let fitted = Size::new(100.0, 1000.0).fit_within(Size::new(500.0, 250.0));
        assert!((fitted.height - 250.0).abs() < 0.001);
        assert!((fitted.width - 25.0).abs() < 0.001);
    }

    #[test]
    fn default_page_content_rect() {
        let rect = PageGeometry::default().content_rect();
        assert!((rect.x - 62.36).abs() < 0.01);
        assert!((rect.y - 56.69).abs() < 0.01);
        assert!((rect.right() - (595.28 - 62.36)).abs() < 0.01);
    }
}
