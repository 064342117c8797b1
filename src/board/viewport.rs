pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 3.0;

/// Scale step for one wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;
/// Scale step for the toolbar zoom buttons.
pub const BUTTON_ZOOM_STEP: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Affine map between screen space and board space.
///
/// `pan` and zoom pivots are relative to the viewport's top-left corner;
/// `origin` is where that corner sits on screen. Only `to_canvas`/`to_screen`
/// deal in absolute screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    pub origin: Point,
    pub pan: Point,
    scale: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            pan: Point::default(),
            scale: 1.0,
        }
    }
}

impl ViewportTransform {
    pub fn new(origin: Point, pan: Point, scale: f64) -> Self {
        Self {
            origin,
            pan,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x - self.pan.x) / self.scale,
            (screen.y - self.origin.y - self.pan.y) / self.scale,
        )
    }

    pub fn to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.scale + self.pan.x + self.origin.x,
            canvas.y * self.scale + self.pan.y + self.origin.y,
        )
    }

    /// Change the scale by `delta`, keeping the board point under `pivot`
    /// (viewport-relative) fixed on screen.
    pub fn zoom(&mut self, delta: f64, pivot: Point) {
        let previous = self.scale;
        self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = self.scale / previous;
        self.pan = Point::new(
            pivot.x - (pivot.x - self.pan.x) * ratio,
            pivot.y - (pivot.y - self.pan.y) * ratio,
        );
    }

    /// One wheel notch. Positive `delta_y` (scrolling towards the user) zooms out.
    pub fn zoom_wheel(&mut self, delta_y: f64, pivot: Point) {
        let delta = if delta_y > 0.0 {
            -WHEEL_ZOOM_STEP
        } else {
            WHEEL_ZOOM_STEP
        };
        self.zoom(delta, pivot);
    }

    pub fn reset(&mut self) {
        self.pan = Point::default();
        self.scale = 1.0;
    }

    /// Board point at the centre of a viewport of the given size.
    pub fn center_canvas(&self, viewport_size: Point) -> Point {
        self.to_canvas(Point::new(
            self.origin.x + viewport_size.x / 2.0,
            self.origin.y + viewport_size.y / 2.0,
        ))
    }

    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.scale * 100.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn transform_roundtrip_with_origin_pan_and_scale() {
        let t = ViewportTransform::new(Point::new(20.0, 30.0), Point::new(37.0, -22.0), 1.75);
        let p = Point::new(8.0, -3.0);
        assert!(close(t.to_canvas(t.to_screen(p)), p));
    }

    #[test]
    fn zoom_about_pointer_keeps_anchor() {
        let mut t = ViewportTransform::new(Point::new(20.0, 30.0), Point::new(37.0, -22.0), 1.0);
        let pivot = Point::new(191.0, 159.0);
        let screen = pivot + t.origin;
        let before = t.to_canvas(screen);
        t.zoom(0.5, pivot);
        assert_eq!(t.scale(), 1.5);
        assert!(close(t.to_canvas(screen), before));
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut t = ViewportTransform::default();
        for _ in 0..100 {
            t.zoom(0.25, Point::new(400.0, 300.0));
        }
        assert_eq!(t.scale(), MAX_SCALE);
        for _ in 0..100 {
            t.zoom(-0.1, Point::new(400.0, 300.0));
        }
        assert_eq!(t.scale(), MIN_SCALE);
    }

    #[test]
    fn wheel_direction_and_label() {
        let mut t = ViewportTransform::default();
        t.zoom_wheel(120.0, Point::default());
        assert_eq!(t.zoom_label(), "90%");
        t.zoom_wheel(-120.0, Point::default());
        t.zoom_wheel(-120.0, Point::default());
        assert_eq!(t.zoom_label(), "110%");
    }

    #[test]
    fn reset_restores_identity() {
        let mut t = ViewportTransform::default();
        t.pan = Point::new(5.0, 6.0);
        t.zoom(1.0, Point::new(3.0, 3.0));
        t.reset();
        assert_eq!(t.pan, Point::default());
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn center_of_identity_viewport() {
        let t = ViewportTransform::default();
        assert_eq!(t.center_canvas(Point::new(800.0, 600.0)), Point::new(400.0, 300.0));
    }
}
