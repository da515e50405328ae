//! Observer registry for pointer events on feature glyphs.
//!
//! The surface that owns the pointer translates its events into pixel
//! coordinates and calls [`FeatureEvents::dispatch`] with the frame it
//! last drew.

use std::fmt;
use crate::frame::{Frame, Glyph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    Click,
    Hover,
}

/// A glyph under the pointer.
#[derive(Debug, Clone, Copy)]
pub struct FeatureHit<'a> {
    pub event: PointerEvent,
    pub glyph: &'a Glyph,
    pub x: f64,
    pub y: f64,
}

type Handler = Box<dyn FnMut(&FeatureHit<'_>)>;

#[derive(Default)]
pub struct FeatureEvents {
    clicks: Vec<Handler>,
    hovers: Vec<Handler>,
}

impl fmt::Debug for FeatureEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureEvents")
            .field("clicks", &self.clicks.len())
            .field("hovers", &self.hovers.len())
            .finish()
    }
}

impl FeatureEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_feature_click<F>(&mut self, handler: F)
    where
        F: FnMut(&FeatureHit<'_>) + 'static,
    {
        self.clicks.push(Box::new(handler));
    }

    pub fn on_feature_hover<F>(&mut self, handler: F)
    where
        F: FnMut(&FeatureHit<'_>) + 'static,
    {
        self.hovers.push(Box::new(handler));
    }

    pub fn has_listeners(&self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Click => !self.clicks.is_empty(),
            PointerEvent::Hover => !self.hovers.is_empty(),
        }
    }

    /// Hit-test `frame` at the pixel and run the matching handlers in
    /// registration order. Returns whether a glyph was hit.
    pub fn dispatch(&mut self, frame: &Frame, event: PointerEvent, x: f64, y: f64) -> bool {
        let glyph = match frame.glyph_at(x, y) {
            Some(glyph) => glyph,
            None => return false,
        };
        let hit = FeatureHit { event, glyph, x, y };
        let handlers = match event {
            PointerEvent::Click => &mut self.clicks,
            PointerEvent::Hover => &mut self.hovers,
        };
        log::trace!(
            "{:?} on feature at {} ({} handlers)",
            event,
            glyph.feature.position,
            handlers.len()
        );
        for handler in handlers.iter_mut() {
            handler(&hit);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::chart::Chart;
    use crate::config::ChartConfig;
    use crate::measure::MonospaceMeasurer;

    fn frame() -> Frame {
        let mut config = ChartConfig::with_width(1000);
        config.scale.min = Some(0);
        config.scale.max = Some(1000);
        let mut chart = Chart::new(config).unwrap();
        chart.add_gene(100, 200, None);
        chart.add_gene(600, 100, None);
        chart.frame(&MonospaceMeasurer::default()).unwrap()
    }

    #[test]
    fn test_click_handlers_run_in_order() {
        let frame = frame();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut events = FeatureEvents::new();
        let a = Rc::clone(&seen);
        events.on_feature_click(move |hit| a.borrow_mut().push(("a", hit.glyph.feature.position)));
        let b = Rc::clone(&seen);
        events.on_feature_click(move |hit| b.borrow_mut().push(("b", hit.glyph.feature.position)));

        let glyph = frame.tracks[0].glyphs[1].rect;
        assert!(events.dispatch(&frame, PointerEvent::Click, glyph.x + 1.0, glyph.y + 1.0));
        assert_eq!(*seen.borrow(), vec![("a", 600), ("b", 600)]);
    }

    #[test]
    fn test_hover_does_not_fire_click_handlers() {
        let frame = frame();
        let clicks = Rc::new(RefCell::new(0));
        let mut events = FeatureEvents::new();
        let c = Rc::clone(&clicks);
        events.on_feature_click(move |_| *c.borrow_mut() += 1);
        assert!(events.has_listeners(PointerEvent::Click));
        assert!(!events.has_listeners(PointerEvent::Hover));

        let glyph = frame.tracks[0].glyphs[0].rect;
        assert!(events.dispatch(&frame, PointerEvent::Hover, glyph.x + 1.0, glyph.y + 1.0));
        assert_eq!(*clicks.borrow(), 0);
    }

    #[test]
    fn test_miss_returns_false() {
        let frame = frame();
        let mut events = FeatureEvents::new();
        events.on_feature_click(|_| panic!("no glyph there"));
        assert!(!events.dispatch(&frame, PointerEvent::Click, 1.0, 1.0));
    }
}
