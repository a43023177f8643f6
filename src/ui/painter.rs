use crate::viewer::surface::{Drawable, GraphicsState, LineStyle, SlotRect, Surface, TooltipLine};

const TOOLTIP_BG: egui::Color32 = egui::Color32::from_rgba_premultiplied(16, 0, 16, 240);
const TOOLTIP_BORDER: egui::Color32 = egui::Color32::from_rgb(80, 0, 255);
const TOOLTIP_PAD: f32 = 4.0;
const TOOLTIP_CURSOR_GAP: f32 = 12.0;

/// `Surface` backed by egui painters. Slot contents go to the widget layer of
/// the `Ui` they were drawn in, so other windows can cover them. Only tooltips
/// go to the tooltip layer, above every window. egui has no lighting or depth
/// model, so the graphics state is only tracked.
pub struct EguiSurface {
    widgets: egui::Painter,
    overlay: egui::Painter,
    state: GraphicsState,
}

impl EguiSurface {
    pub fn new(ui: &egui::Ui) -> Self {
        let layer = egui::LayerId::new(egui::Order::Tooltip, ui.id().with("slot_overlay"));
        Self {
            widgets: ui.painter().clone(),
            overlay: ui.ctx().layer_painter(layer),
            state: GraphicsState::RESTORED,
        }
    }

}

pub fn argb(color: u32) -> egui::Color32 {
    let [a, r, g, b] = color.to_be_bytes();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn to_rect(rect: SlotRect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}

fn line_color(style: LineStyle) -> egui::Color32 {
    match style {
        LineStyle::Title => egui::Color32::WHITE,
        LineStyle::Normal => egui::Color32::from_gray(170),
        LineStyle::Secondary => egui::Color32::from_gray(120),
        LineStyle::ModName => egui::Color32::from_rgb(85, 85, 255),
    }
}

impl Surface for EguiSurface {
    fn graphics_state(&self) -> GraphicsState {
        self.state
    }

    fn set_graphics_state(&mut self, state: GraphicsState) {
        self.state = state;
    }

    fn fill_rect(&mut self, rect: SlotRect, color: u32) {
        self.widgets.rect_filled(to_rect(rect), 0.0, argb(color));
    }

    fn stroke_rect(&mut self, rect: SlotRect, color: u32) {
        self.widgets.rect_stroke(
            to_rect(rect),
            0.0,
            egui::Stroke::new(1.0, argb(color)),
            egui::StrokeKind::Inside,
        );
    }

    fn blit(&mut self, texture: egui::TextureId, rect: SlotRect) {
        self.widgets.image(
            texture,
            to_rect(rect),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            argb(self.state.color),
        );
    }

    fn text(&mut self, x: i32, y: i32, text: &str, font: &egui::FontId, color: u32) {
        self.widgets.text(
            egui::pos2(x as f32, y as f32),
            egui::Align2::LEFT_TOP,
            text,
            font.clone(),
            argb(color),
        );
    }

    fn tooltip(&mut self, x: i32, y: i32, lines: &[TooltipLine], font: &egui::FontId) {
        if lines.is_empty() {
            return;
        }
        let painter = &self.overlay;
        let galleys: Vec<_> = lines
            .iter()
            .map(|line| painter.layout_no_wrap(line.text.clone(), font.clone(), line_color(line.style)))
            .collect();
        let width = galleys.iter().map(|g| g.size().x).fold(0.0, f32::max);
        let height: f32 = galleys.iter().map(|g| g.size().y).sum();

        // Right of and above the cursor, pushed back inside the screen
        let size = egui::vec2(width, height) + egui::vec2(TOOLTIP_PAD, TOOLTIP_PAD) * 2.0;
        let screen = painter.ctx().screen_rect();
        let mut min = egui::pos2(x as f32 + TOOLTIP_CURSOR_GAP, y as f32 - TOOLTIP_CURSOR_GAP);
        if min.x + size.x > screen.max.x {
            min.x = (x as f32 - TOOLTIP_CURSOR_GAP - size.x).max(screen.min.x);
        }
        min.y = min.y.clamp(screen.min.y, (screen.max.y - size.y).max(screen.min.y));
        let frame = egui::Rect::from_min_size(min, size);

        painter.rect(
            frame,
            0.0,
            TOOLTIP_BG,
            egui::Stroke::new(1.0, TOOLTIP_BORDER),
            egui::StrokeKind::Inside,
        );
        let mut cursor = frame.min + egui::vec2(TOOLTIP_PAD, TOOLTIP_PAD);
        for galley in galleys {
            let line_height = galley.size().y;
            painter.galley(cursor, galley, egui::Color32::WHITE);
            cursor.y += line_height;
        }
    }
}

/// Dark cell behind every slot.
pub struct SlotFrame {
    pub size: i32,
}

impl SlotFrame {
    const FILL: u32 = 0xC814_141E;
    const BORDER: u32 = 0xFF3C_3250;
}

impl Drawable for SlotFrame {
    fn draw(&self, surface: &mut dyn Surface, x: i32, y: i32) {
        let rect = SlotRect::new(x, y, self.size, self.size);
        surface.fill_rect(rect, Self::FILL);
        surface.stroke_rect(rect, Self::BORDER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_unpacks_channels() {
        assert_eq!(argb(0xFF10_2030), egui::Color32::from_rgb(0x10, 0x20, 0x30));
        assert_eq!(argb(0x00FF_FFFF).a(), 0);
    }

    #[test]
    fn test_slot_frame_fills_then_strokes() {
        use crate::viewer::surface::testing::{Op, RecordingSurface};

        let mut surface = RecordingSurface::default();
        SlotFrame { size: 18 }.draw(&mut surface, 4, 8);
        let rect = SlotRect::new(4, 8, 18, 18);
        assert_eq!(surface.ops[0].0, Op::Fill(rect, SlotFrame::FILL));
        assert_eq!(surface.ops[1].0, Op::Stroke(rect, SlotFrame::BORDER));
        assert_eq!(argb(SlotFrame::FILL), egui::Color32::from_rgba_unmultiplied(20, 20, 30, 200));
    }

    #[test]
    fn test_hover_wash_is_half_transparent() {
        let wash = argb(crate::viewer::tooltip::HOVER_WASH);
        assert_eq!(wash.a(), 0x7F);
    }
}
