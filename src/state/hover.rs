// Per-label hover state and the shared label hit-test used to exclude labels
// from drag start.
use std::cell::RefCell;
use std::rc::Rc;

use crate::model::Point2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

impl HoverState {
    pub fn enter(self) -> Self {
        HoverState::Hovered
    }

    pub fn leave(self) -> Self {
        HoverState::Idle
    }

    pub fn is_hovered(self) -> bool {
        self == HoverState::Hovered
    }

    pub fn scale(self) -> f64 {
        if self.is_hovered() { 1.1 } else { 1.0 }
    }

    /// Flat-mode glow radius in pixels.
    pub fn glow_px(self) -> u32 {
        if self.is_hovered() { 20 } else { 10 }
    }

    /// Scene-mode emissive intensity.
    pub fn emissive(self) -> f32 {
        if self.is_hovered() { 0.8 } else { 0.4 }
    }
}

type Probe = Rc<dyn Fn(Point2) -> bool>;

/// Slot for a renderer-provided probe answering "is there a label under this
/// client-space point". Empty means only DOM hit-testing applies.
#[derive(Clone, Default)]
pub struct LabelHitTest(Rc<RefCell<Option<Probe>>>);

impl LabelHitTest {
    pub fn install(&self, probe: impl Fn(Point2) -> bool + 'static) {
        *self.0.borrow_mut() = Some(Rc::new(probe));
    }

    pub fn clear(&self) {
        self.0.borrow_mut().take();
    }

    pub fn hits(&self, client: Point2) -> bool {
        // clone out so the probe may touch the slot itself
        let probe = self.0.borrow().clone();
        probe.is_some_and(|f| f(client))
    }
}

impl PartialEq for LabelHitTest {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_leave_toggle() {
        let h = HoverState::default();
        assert!(!h.is_hovered());
        let h = h.enter();
        assert!(h.is_hovered());
        assert_eq!(h.enter(), HoverState::Hovered);
        assert_eq!(h.leave(), HoverState::Idle);
        assert_eq!(HoverState::Idle.leave(), HoverState::Idle);
    }

    #[test]
    fn hovered_label_glows_brighter() {
        assert_eq!(HoverState::Idle.glow_px(), 10);
        assert_eq!(HoverState::Hovered.glow_px(), 20);
        assert!(HoverState::Hovered.emissive() > HoverState::Idle.emissive());
        assert_eq!(HoverState::Hovered.scale(), 1.1);
    }

    #[test]
    fn hit_test_slot_is_shared_between_clones() {
        let slot = LabelHitTest::default();
        let other = slot.clone();
        assert!(!other.hits(Point2::ZERO));
        slot.install(|p| p.x > 10.0);
        assert!(other.hits(Point2::new(11.0, 0.0)));
        assert!(!other.hits(Point2::new(9.0, 0.0)));
        other.clear();
        assert!(!slot.hits(Point2::new(11.0, 0.0)));
        assert!(slot == other);
        assert!(slot != LabelHitTest::default());
    }
}
