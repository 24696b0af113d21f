//! Rasterizes a [`PanelFrame`] with `embedded-graphics`.
//!
//! Only mono fonts are available, so each requested font size is mapped to
//! the tallest bundled font that fits it after [`FONT_SCALE`]. Mono fonts
//! cannot be rotated; rotated units are drawn as a vertical column of
//! characters, in reading order for the rotation.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use panel_common::config::{BORDER_RADIUS, BORDER_WIDTH, NEIGHBOR_GAP};
use panel_common::layout::UnitRotation;
use panel_common::{PanelAnchor, PanelFrame, SlotFrame};
use profont::{PROFONT_9_POINT, PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

// =============================================================================
// Fonts
// =============================================================================

/// Screen pixels per font unit. Panel font sizes target a much denser
/// display than the simulated one.
pub const FONT_SCALE: f32 = 0.4;

/// Bundled fonts, tallest first.
const FONTS: [&MonoFont<'static>; 6] = [
    &PROFONT_24_POINT,
    &PROFONT_18_POINT,
    &PROFONT_14_POINT,
    &PROFONT_12_POINT,
    &PROFONT_10_POINT,
    &PROFONT_9_POINT,
];

/// Tallest font no taller than `size` font units, or the smallest one.
pub fn font_for(size: u32) -> &'static MonoFont<'static> {
    let target = (size as f32 * FONT_SCALE) as u32;
    FONTS
        .iter()
        .copied()
        .find(|font| font.character_size.height <= target)
        .unwrap_or(&FONT_6X10)
}

const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Alphabetic)
    .build();

const STACKED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Colors
// =============================================================================

const PANEL_FILL: Rgb565 = Rgb565::new(2, 4, 2);
const NEIGHBOR_OUTLINE: Rgb565 = Rgb565::new(10, 20, 10);

#[inline]
fn native(color: Rgb888) -> Rgb565 { Rgb565::from(color) }

// =============================================================================
// Drawing
// =============================================================================

/// Outline the neighbor widgets that push the panel away from the anchor.
pub fn draw_neighbors<D>(
    display: &mut D,
    anchor: &PanelAnchor,
    neighbor_widths: &[u32],
) where
    D: DrawTarget<Color = Rgb565>,
{
    let height = (anchor.bottom_y - anchor.top_y).max(0) as u32;
    let mut right = anchor.right_x;
    for &width in neighbor_widths {
        let rect = Rectangle::new(Point::new(right - width as i32, anchor.top_y), Size::new(width, height));
        rect.into_styled(PrimitiveStyle::with_stroke(NEIGHBOR_OUTLINE, 2)).draw(display).ok();
        right -= (width + NEIGHBOR_GAP) as i32;
    }
}

/// Draw the panel border, background and every slot.
pub fn draw_panel<D>(
    display: &mut D,
    frame: &PanelFrame,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if frame.is_empty() {
        return;
    }

    let style = PrimitiveStyleBuilder::new()
        .stroke_color(native(frame.border_color))
        .stroke_width(BORDER_WIDTH)
        .fill_color(PANEL_FILL)
        .build();
    RoundedRectangle::with_equal_corners(frame.bounds, Size::new(BORDER_RADIUS, BORDER_RADIUS))
        .into_styled(style)
        .draw(display)
        .ok();

    for slot in &frame.slots {
        draw_slot(display, slot);
    }
}

fn draw_slot<D>(
    display: &mut D,
    slot: &SlotFrame,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let d = &slot.display;
    let value_style = MonoTextStyle::new(font_for(slot.fonts.value), native(d.value_color));
    Text::with_text_style(&d.value, slot.anchors.value, value_style, CENTERED).draw(display).ok();

    if !d.label.is_empty() {
        let label_style = MonoTextStyle::new(font_for(slot.fonts.label), native(d.label_color));
        Text::with_text_style(&d.label, slot.anchors.label, label_style, CENTERED).draw(display).ok();
    }

    if !d.unit.is_empty() {
        let unit_style = MonoTextStyle::new(font_for(slot.fonts.unit), native(d.unit_color));
        draw_stacked(display, &d.unit, slot.anchors.unit, slot.anchors.unit_rotation, unit_style);
    }
}

/// Draw `text` as a vertical column centered on `center`.
fn draw_stacked<D>(
    display: &mut D,
    text: &str,
    center: Point,
    rotation: UnitRotation,
    style: MonoTextStyle<'_, Rgb565>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let line_height = style.font.character_size.height as i32;
    let count = text.chars().count() as i32;
    let top = center.y - (count - 1) * line_height / 2;

    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        // Bottom-to-top reading puts the first character last
        let row = match rotation {
            UnitRotation::Ccw90 => count - 1 - i as i32,
            UnitRotation::Cw90 => i as i32,
        };
        let glyph: &str = ch.encode_utf8(&mut buf);
        Text::with_text_style(glyph, Point::new(center.x, top + row * line_height), style, STACKED)
            .draw(display)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;
    use panel_common::colors::BORDER_IDLE;
    use panel_common::{MetricId, PanelConfig, StateSnapshot, TelemetryPanel};

    use super::*;

    #[test]
    fn test_font_choice_tracks_size() {
        assert!(font_for(78).character_size.height >= font_for(38).character_size.height);
        assert!(font_for(38).character_size.height >= font_for(10).character_size.height);
        assert_eq!(font_for(1).character_size, FONT_6X10.character_size);
    }

    #[test]
    fn test_panel_border_is_drawn() {
        let config = PanelConfig::new(&[MetricId::CpuTemp.code(), MetricId::LeadTtc.code()], 5, 2, true)
            .expect("valid config");
        let mut panel = TelemetryPanel::new(config);
        let anchor = PanelAnchor::new(600, 40, 440);
        let frame = panel.frame(&StateSnapshot::default(), &anchor, &[]);

        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(640, 480));
        draw_panel(&mut display, &frame);

        let top_edge = Point::new(frame.bounds.center().x, frame.bounds.top_left.y + 1);
        assert_eq!(display.get_pixel(top_edge), native(BORDER_IDLE));
        assert_eq!(display.get_pixel(Point::new(5, 5)), Rgb565::BLACK);
    }
}
