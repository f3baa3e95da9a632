// Viewport pan/zoom state, reduced from input actions.
use std::rc::Rc;

use yew::Reducible;

use crate::model::Point2;
use crate::state::touch::{TouchGesture, classify};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_in_step: f64,
    pub zoom_out_step: f64,
    pub default_zoom: f64,
    pub default_pan: Point2,
    /// Pan distance for one arrow key or arrow button press.
    pub nudge_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.2,
            zoom_max: 4.0,
            zoom_in_step: 1.1,
            zoom_out_step: 0.9,
            default_zoom: 1.0,
            default_pan: Point2::ZERO,
            nudge_px: 40.0,
        }
    }
}

impl ViewportConfig {
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Screen transform handed to the renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub zoom: f64,
    pub pan: Point2,
}

impl Transform {
    pub fn apply(&self, base: Point2) -> Point2 {
        self.pan + base * self.zoom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    DragStart { pointer: Point2, on_label: bool },
    DragMove { pointer: Point2 },
    DragEnd,
    Wheel { delta_y: f64 },
    Zoom(ZoomDirection),
    PanBy(Point2),
    TouchStart { touches: Vec<Point2>, on_label: bool },
    TouchMove { touches: Vec<Point2> },
    /// `remaining` holds the touches still down after the end/cancel.
    TouchEnd { remaining: Vec<Point2> },
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub pan: Point2,
    pub dragging: bool,
    /// Pointer minus pan at drag start; only meaningful while `dragging`.
    pub drag_anchor: Point2,
    pub config: ViewportConfig,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl ViewState {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            zoom: config.clamp_zoom(config.default_zoom),
            pan: config.default_pan,
            dragging: false,
            drag_anchor: Point2::ZERO,
            config,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            zoom: self.zoom,
            pan: self.pan,
        }
    }

    /// Applies one action. Returns whether anything changed.
    pub fn apply(&mut self, action: ViewAction) -> bool {
        let before = self.clone();
        match action {
            ViewAction::DragStart { pointer, on_label } => self.drag_start(pointer, on_label),
            ViewAction::DragMove { pointer } => self.drag_move(pointer),
            ViewAction::DragEnd => self.drag_end(),
            ViewAction::Wheel { delta_y } => self.wheel(delta_y),
            ViewAction::Zoom(dir) => self.zoom_step(dir),
            ViewAction::PanBy(delta) => self.pan_by(delta),
            ViewAction::TouchStart { touches, on_label } => self.touch_start(&touches, on_label),
            ViewAction::TouchMove { touches } => self.touch_move(&touches),
            ViewAction::TouchEnd { remaining } => self.touch_end(&remaining),
            ViewAction::Reset => self.reset(),
        }
        *self != before
    }

    pub fn drag_start(&mut self, pointer: Point2, on_label: bool) {
        if on_label || !pointer.is_finite() {
            return;
        }
        self.drag_anchor = pointer - self.pan;
        self.dragging = true;
    }

    pub fn drag_move(&mut self, pointer: Point2) {
        if !self.dragging || !pointer.is_finite() {
            return;
        }
        self.pan = pointer - self.drag_anchor;
    }

    pub fn drag_end(&mut self) {
        self.dragging = false;
    }

    pub fn wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let dir = if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        self.zoom_step(dir);
    }

    pub fn zoom_step(&mut self, dir: ZoomDirection) {
        let factor = match dir {
            ZoomDirection::In => self.config.zoom_in_step,
            ZoomDirection::Out => self.config.zoom_out_step,
        };
        self.zoom = self.config.clamp_zoom(self.zoom * factor);
    }

    pub fn pan_by(&mut self, delta: Point2) {
        if !delta.is_finite() {
            return;
        }
        self.pan = self.pan + delta;
        if self.dragging {
            // keep an in-flight drag consistent with the nudged pan
            self.drag_anchor = self.drag_anchor - delta;
        }
    }

    pub fn touch_start(&mut self, touches: &[Point2], on_label: bool) {
        if let TouchGesture::Single(p) = classify(touches) {
            self.drag_start(p, on_label);
        }
    }

    pub fn touch_move(&mut self, touches: &[Point2]) {
        if let TouchGesture::Single(p) = classify(touches) {
            self.drag_move(p);
        }
    }

    /// Ends the drag once no finger is left. When a lift leaves exactly one
    /// finger down, the drag continues from that finger's current position.
    pub fn touch_end(&mut self, remaining: &[Point2]) {
        match classify(remaining) {
            TouchGesture::None => self.drag_end(),
            TouchGesture::Single(p) if self.dragging && p.is_finite() => {
                self.drag_anchor = p - self.pan;
            }
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        *self = ViewState::new(self.config);
    }
}

impl Reducible for ViewState {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn single_zoom_in_tick() {
        let mut s = ViewState::default();
        assert_eq!(s.zoom, 1.0);
        s.wheel(-100.0);
        assert!(approx(s.zoom, 1.1));
    }

    #[test]
    fn ten_ticks_compound_without_clamping() {
        let mut s = ViewState::default();
        for _ in 0..10 {
            s.wheel(-1.0);
        }
        assert!(approx(s.zoom, 1.1f64.powi(10)));
        assert!(s.zoom < s.config.zoom_max);
    }

    #[test]
    fn zoom_in_clamps_at_max() {
        let mut s = ViewState::default();
        for i in 0..40 {
            s.wheel(-1.0);
            assert!(s.zoom <= 4.0);
            if i >= 15 {
                assert_eq!(s.zoom, 4.0);
            }
        }
    }

    #[test]
    fn zoom_out_clamps_at_min() {
        let mut s = ViewState::default();
        for _ in 0..60 {
            s.wheel(3.0);
            assert!(s.zoom >= 0.2);
        }
        assert_eq!(s.zoom, 0.2);
    }

    #[test]
    fn zoom_stays_in_bounds_for_mixed_sequences() {
        let mut s = ViewState::default();
        let deltas = [-1.0, -1.0, 5.0, -120.0, 53.0, 0.0, f64::NAN, -3.0, 1.0];
        for round in 0..30 {
            for (i, d) in deltas.iter().enumerate() {
                let d = if (round + i) % 4 == 0 { -d } else { *d };
                s.wheel(d);
                assert!((0.2..=4.0).contains(&s.zoom), "zoom {} out of range", s.zoom);
            }
        }
    }

    #[test]
    fn zero_and_nan_wheel_are_noops() {
        let mut s = ViewState::default();
        assert!(!s.apply(ViewAction::Wheel { delta_y: 0.0 }));
        assert!(!s.apply(ViewAction::Wheel { delta_y: f64::NAN }));
        assert_eq!(s, ViewState::default());
    }

    #[test]
    fn drag_translates_pan_exactly() {
        let mut s = ViewState::default();
        s.drag_start(Point2::new(100.0, 100.0), false);
        s.drag_move(Point2::new(140.0, 80.0));
        s.drag_end();
        assert_eq!(s.pan, Point2::new(40.0, -20.0));
    }

    #[test]
    fn drag_is_pure_translation_from_existing_pan() {
        let mut s = ViewState::default();
        s.pan = Point2::new(-15.0, 30.0);
        s.zoom = 2.5;
        let p0 = Point2::new(10.0, 20.0);
        let p1 = Point2::new(-50.0, 75.0);
        s.drag_start(p0, false);
        s.drag_move(Point2::new(500.0, 500.0));
        s.drag_move(p1);
        assert_eq!(s.pan, Point2::new(-15.0, 30.0) + (p1 - p0));
        assert_eq!(s.zoom, 2.5);
    }

    #[test]
    fn drag_start_on_label_is_ignored() {
        let mut s = ViewState::default();
        s.drag_start(Point2::new(5.0, 5.0), true);
        assert!(!s.dragging);
        s.drag_move(Point2::new(50.0, 50.0));
        assert_eq!(s.pan, Point2::ZERO);
    }

    #[test]
    fn drag_move_without_drag_is_noop() {
        let mut s = ViewState::default();
        assert!(!s.apply(ViewAction::DragMove {
            pointer: Point2::new(3.0, 4.0)
        }));
    }

    #[test]
    fn drag_end_is_idempotent() {
        let mut s = ViewState::default();
        s.drag_start(Point2::new(1.0, 1.0), false);
        s.drag_end();
        let once = s.clone();
        s.drag_end();
        assert_eq!(s, once);
        assert!(!s.apply(ViewAction::DragEnd));
    }

    #[test]
    fn reset_restores_defaults_from_any_state() {
        let mut s = ViewState::default();
        s.wheel(-1.0);
        s.wheel(-1.0);
        s.drag_start(Point2::new(0.0, 0.0), false);
        s.drag_move(Point2::new(77.0, -12.0));
        s.reset();
        assert_eq!(s, ViewState::default());
        assert_eq!(s.transform(), Transform { zoom: 1.0, pan: Point2::ZERO });
    }

    #[test]
    fn single_touch_drags_and_multi_touch_is_ignored() {
        let mut s = ViewState::default();
        s.touch_start(&[Point2::new(0.0, 0.0), Point2::new(9.0, 9.0)], false);
        assert!(!s.dragging);
        s.touch_start(&[], false);
        assert!(!s.dragging);

        s.touch_start(&[Point2::new(10.0, 10.0)], false);
        assert!(s.dragging);
        s.touch_move(&[Point2::new(30.0, 0.0)]);
        assert_eq!(s.pan, Point2::new(20.0, -10.0));
        s.touch_move(&[Point2::new(90.0, 90.0), Point2::new(0.0, 0.0)]);
        assert_eq!(s.pan, Point2::new(20.0, -10.0));
        s.touch_end(&[Point2::new(30.0, 0.0)]);
        assert!(s.dragging);
        s.touch_end(&[]);
        assert!(!s.dragging);
        assert_eq!(s.zoom, 1.0);
    }

    #[test]
    fn lifting_the_first_of_two_fingers_does_not_jump() {
        let mut s = ViewState::default();
        s.touch_start(&[Point2::new(100.0, 100.0)], false);
        s.touch_start(&[Point2::new(100.0, 100.0), Point2::new(300.0, 250.0)], false);
        s.touch_end(&[Point2::new(300.0, 250.0)]);
        assert!(s.dragging);
        assert_eq!(s.pan, Point2::ZERO);
        s.touch_move(&[Point2::new(305.0, 255.0)]);
        assert_eq!(s.pan, Point2::new(5.0, 5.0));
    }

    #[test]
    fn remaining_finger_after_label_press_does_not_start_a_drag() {
        let mut s = ViewState::default();
        s.touch_start(&[Point2::new(10.0, 10.0)], true);
        s.touch_start(&[Point2::new(10.0, 10.0), Point2::new(60.0, 60.0)], false);
        assert!(!s.apply(ViewAction::TouchEnd {
            remaining: vec![Point2::new(60.0, 60.0)]
        }));
        s.touch_move(&[Point2::new(90.0, 90.0)]);
        assert_eq!(s.pan, Point2::ZERO);
    }

    #[test]
    fn pan_by_keeps_active_drag_consistent() {
        let mut s = ViewState::default();
        s.drag_start(Point2::new(10.0, 10.0), false);
        s.pan_by(Point2::new(40.0, 0.0));
        assert_eq!(s.pan, Point2::new(40.0, 0.0));
        s.drag_move(Point2::new(10.0, 10.0));
        assert_eq!(s.pan, Point2::new(40.0, 0.0));
    }

    #[test]
    fn transform_scales_then_pans() {
        let t = Transform {
            zoom: 2.0,
            pan: Point2::new(10.0, -5.0),
        };
        let base = Point2::new(100.0, 50.0);
        let screen = t.apply(base);
        assert_eq!(screen, Point2::new(210.0, 95.0));
    }

    #[test]
    fn reducer_returns_same_rc_for_noops() {
        let s = Rc::new(ViewState::default());
        let same = s.clone().reduce(ViewAction::DragEnd);
        assert!(Rc::ptr_eq(&s, &same));
        let zoomed = s.clone().reduce(ViewAction::Zoom(ZoomDirection::In));
        assert!(!Rc::ptr_eq(&s, &zoomed));
        assert!(approx(zoomed.zoom, 1.1));
    }
}
