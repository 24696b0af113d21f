//! Frame driver for the telemetry panel.
//!
//! Once per render frame the host hands the panel a [`StateSnapshot`] and
//! the panel's placement. The panel lays out the configured slots, resolves
//! every visible metric, records one touch region per slot and returns a
//! [`PanelFrame`]: plain draw instructions for whatever rasterizer the host
//! uses. The panel never draws anything itself.
//!
//! # Ownership
//!
//! The panel exclusively owns the grade estimator and the touch registry.
//! The snapshot is borrowed for the duration of one frame only.
//!
//! # Frame Sequence
//!
//! 1. Compute the [`SlotLayout`] from the [`LayoutSpec`].
//! 2. Clear last frame's touch regions.
//! 3. For each visible slot: resolve the metric, size its fonts, compute its
//!    text anchors and record its touch region.
//! 4. Pick the border color from the time since the last tap.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::catalog::{self, GradeEstimator, MetricCode, MetricDisplay, MetricInput};
use crate::colors::{BORDER_ACTIVE, BORDER_IDLE};
use crate::config::{MAX_SLOTS, PanelConfig, TOUCH_HIGHLIGHT_S};
use crate::fonts::FontSizes;
use crate::layout::{self, LayoutSpec, SlotLayout, TextAnchors};
use crate::placement::PanelAnchor;
use crate::snapshot::StateSnapshot;
use crate::touch::TouchRegionRegistry;

// =============================================================================
// Frame Output
// =============================================================================

/// Draw instructions for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFrame {
    /// Index into the configured metric list.
    pub index: usize,
    pub metric: MetricCode,
    pub rect: Rectangle,
    pub display: MetricDisplay,
    pub fonts: FontSizes,
    pub anchors: TextAnchors,
}

/// Draw instructions for the whole panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFrame {
    /// Outer rounded rectangle. Zero-sized when nothing is shown.
    pub bounds: Rectangle,
    pub border_color: Rgb888,
    pub font_scale: f32,
    pub slots: Vec<SlotFrame, MAX_SLOTS>,
}

impl PanelFrame {
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }
}

// =============================================================================
// Panel
// =============================================================================

pub struct TelemetryPanel {
    config: PanelConfig,
    grade: GradeEstimator,
    touch: TouchRegionRegistry,
    last_tap_s: Option<f32>,
}

impl TelemetryPanel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            grade: GradeEstimator::new(),
            touch: TouchRegionRegistry::new(),
            last_tap_s: None,
        }
    }

    /// Swap in a new configuration. Grade history survives.
    pub fn reconfigure(
        &mut self,
        config: PanelConfig,
    ) {
        log::debug!("panel reconfigured with {} slots", config.metrics().len());
        self.config = config;
    }

    pub fn config(&self) -> &PanelConfig { &self.config }

    pub fn grade_estimator(&self) -> &GradeEstimator { &self.grade }

    pub fn touch_regions(&self) -> &TouchRegionRegistry { &self.touch }

    /// Produce this frame's draw instructions, placing the panel against
    /// `anchor` and to the left of `neighbor_widths`.
    pub fn frame(
        &mut self,
        state: &StateSnapshot,
        anchor: &PanelAnchor,
        neighbor_widths: &[u32],
    ) -> PanelFrame {
        let spec = anchor.layout_spec(
            neighbor_widths,
            self.config.metrics().len(),
            self.config.max_rows(),
            self.config.max_columns(),
        );
        self.frame_with_spec(state, &spec)
    }

    /// Produce this frame's draw instructions for an explicit layout.
    ///
    /// `spec.slot_count` is clamped to the configured metric count.
    pub fn frame_with_spec(
        &mut self,
        state: &StateSnapshot,
        spec: &LayoutSpec,
    ) -> PanelFrame {
        let metrics = self.config.metrics();
        let spec = LayoutSpec {
            slot_count: spec.slot_count.min(metrics.len()),
            ..*spec
        };
        let slot_layout = layout::layout(&spec);

        self.touch.begin_frame();
        let input = MetricInput {
            state,
            is_metric: self.config.is_metric(),
        };

        let mut slots = Vec::new();
        for geometry in &slot_layout.slots {
            let code = metrics[geometry.index];
            let display = catalog::resolve(code, &input, &mut self.grade);
            let fonts = FontSizes::for_display(&display, slot_layout.font_scale);
            let anchors = geometry.anchors(&fonts, !display.label.is_empty(), !display.unit.is_empty());
            self.touch.record(geometry.index, geometry.rect);
            slots
                .push(SlotFrame {
                    index: geometry.index,
                    metric: code,
                    rect: geometry.rect,
                    display,
                    fonts,
                    anchors,
                })
                .ok();
        }

        PanelFrame {
            bounds: bounds_of(&slot_layout, &spec),
            border_color: self.border_color(state.timestamp_s),
            font_scale: slot_layout.font_scale,
            slots,
        }
    }

    /// Slot under `point` as of the last frame.
    pub fn hit_test(
        &self,
        point: Point,
    ) -> Option<usize> {
        self.touch.hit_test(point)
    }

    /// Handle a tap at `point`. A hit starts the border highlight and
    /// returns the slot index.
    pub fn tap(
        &mut self,
        point: Point,
        now_s: f32,
    ) -> Option<usize> {
        let slot = self.touch.hit_test(point)?;
        self.last_tap_s = Some(now_s);
        Some(slot)
    }

    fn border_color(
        &self,
        now_s: f32,
    ) -> Rgb888 {
        match self.last_tap_s {
            Some(tap) if now_s - tap <= TOUCH_HIGHLIGHT_S => BORDER_ACTIVE,
            _ => BORDER_IDLE,
        }
    }
}

fn bounds_of(
    slot_layout: &SlotLayout,
    spec: &LayoutSpec,
) -> Rectangle {
    if slot_layout.is_empty() { Rectangle::zero() } else { spec.panel }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricId;
    use crate::grade::GradePhase;

    const ANCHOR: PanelAnchor = PanelAnchor::new(1800, 200, 700);

    fn panel(ids: &[MetricId]) -> TelemetryPanel {
        let codes: std::vec::Vec<MetricCode> = ids.iter().map(|id| id.code()).collect();
        TelemetryPanel::new(PanelConfig::new(&codes, 5, 2, true).expect("valid config"))
    }

    fn driving(t: f32) -> StateSnapshot {
        let mut state = StateSnapshot::default();
        state.timestamp_s = t;
        state.car.v_ego_mps = 25.0;
        state.gps.accuracy_m = 0.6;
        state.gps.altitude_m = 50.0 + t;
        state
    }

    #[test]
    fn test_frame_resolves_each_slot() {
        let mut p = panel(&[MetricId::CpuTemp, MetricId::LeadTtc, MetricId::TripDistance]);
        let frame = p.frame(&StateSnapshot::default(), &ANCHOR, &[]);
        assert_eq!(frame.slots.len(), 3);
        assert_eq!(frame.slots[0].display.label.as_str(), "CPU TEMP");
        assert_eq!(frame.slots[1].display.value.as_str(), "-");
        assert_eq!(frame.slots[2].metric, MetricId::TripDistance.code());
        assert_eq!(frame.font_scale, 5.0 / 3.0);
    }

    #[test]
    fn test_invalid_code_renders_sentinel() {
        let config = PanelConfig::new(&[MetricCode(4000)], 5, 2, true).expect("valid config");
        let mut p = TelemetryPanel::new(config);
        let frame = p.frame(&StateSnapshot::default(), &ANCHOR, &[]);
        assert_eq!(frame.slots[0].display.value.as_str(), "42");
        assert_eq!(frame.slots[0].display.label.as_str(), "INVALID");
    }

    #[test]
    fn test_touch_regions_match_frame() {
        let ids = [MetricId::CpuTemp; 7];
        let mut p = panel(&ids);
        let frame = p.frame(&StateSnapshot::default(), &ANCHOR, &[]);
        assert_eq!(p.touch_regions().len(), 7);
        for slot in &frame.slots {
            assert_eq!(p.touch_regions().region(slot.index), Some(slot.rect));
        }

        // Shrink to two slots: stale regions disappear
        let config = PanelConfig::new(&[MetricId::CpuTemp.code(); 2], 5, 2, true).expect("valid config");
        p.reconfigure(config);
        let frame = p.frame(&StateSnapshot::default(), &ANCHOR, &[]);
        assert_eq!(p.touch_regions().len(), 2);
        assert_eq!(p.touch_regions().region(5), None);
        assert_eq!(frame.slots.len(), 2);
    }

    #[test]
    fn test_empty_config_renders_nothing() {
        let mut p = panel(&[]);
        let frame = p.frame(&StateSnapshot::default(), &ANCHOR, &[]);
        assert!(frame.is_empty());
        assert_eq!(frame.bounds, Rectangle::zero());
        assert!(p.touch_regions().is_empty());
    }

    #[test]
    fn test_tap_highlights_border_for_a_while() {
        let mut p = panel(&[MetricId::CpuTemp, MetricId::MemoryTemp]);
        let frame = p.frame(&driving(10.0), &ANCHOR, &[]);
        assert_eq!(frame.border_color, BORDER_IDLE);

        let center = frame.slots[1].rect.center();
        assert_eq!(p.tap(center, 10.0), Some(1));
        assert_eq!(p.frame(&driving(11.5), &ANCHOR, &[]).border_color, BORDER_ACTIVE);
        assert_eq!(p.frame(&driving(12.5), &ANCHOR, &[]).border_color, BORDER_IDLE);

        // A miss does not restart the highlight
        assert_eq!(p.tap(Point::new(0, 0), 13.0), None);
        assert_eq!(p.frame(&driving(13.0), &ANCHOR, &[]).border_color, BORDER_IDLE);
    }

    #[test]
    fn test_grade_history_survives_reconfigure() {
        let mut p = panel(&[MetricId::GradeGps]);
        for frame in 0..20 {
            p.frame(&driving(frame as f32), &ANCHOR, &[]);
        }
        let samples = p.grade_estimator().len();
        assert!(samples > 0);

        let config = PanelConfig::new(&[MetricId::CpuTemp.code(), MetricId::GradeGps.code()], 5, 2, true)
            .expect("valid config");
        p.reconfigure(config);
        assert_eq!(p.grade_estimator().len(), samples);
    }

    #[test]
    fn test_grade_only_advances_when_shown() {
        let mut p = panel(&[MetricId::CpuTemp]);
        for frame in 0..30 {
            p.frame(&driving(frame as f32), &ANCHOR, &[]);
        }
        assert_eq!(p.grade_estimator().phase(), GradePhase::Cold);
    }

    #[test]
    fn test_explicit_spec_is_clamped_to_config() {
        let mut p = panel(&[MetricId::CpuTemp, MetricId::CpuTemp]);
        let spec = LayoutSpec {
            panel: Rectangle::new(Point::new(0, 0), Size::new(200, 500)),
            slot_count: 9,
            max_rows: 5,
            max_columns: 2,
        };
        assert_eq!(p.frame_with_spec(&StateSnapshot::default(), &spec).slots.len(), 2);
    }
}
