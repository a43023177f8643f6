use std::ops::{Deref, DerefMut};

/// Opaque white in ARGB.
pub const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;

/// Integer rectangle in the coordinate system of the enclosing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SlotRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..*self }
    }

    pub fn inset(&self, px: i32, py: i32) -> Self {
        Self::new(self.x + px, self.y + py, self.w - 2 * px, self.h - 2 * py)
    }
}

/// The slice of host graphics state slot drawing touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphicsState {
    pub lighting: bool,
    pub depth_test: bool,
    /// ARGB colour multiplied into blits.
    pub color: u32,
}

impl GraphicsState {
    /// What every draw path leaves behind.
    pub const RESTORED: Self = Self { lighting: true, depth_test: true, color: OPAQUE_WHITE };
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::RESTORED
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Normal,
    Secondary,
    ModName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipLine {
    pub text: String,
    pub style: LineStyle,
}

impl TooltipLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self { text: text.into(), style }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Title)
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Normal)
    }

    pub fn secondary(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Secondary)
    }

    pub fn mod_name(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::ModName)
    }
}

/// Host drawing primitives. Colours are ARGB.
pub trait Surface {
    fn graphics_state(&self) -> GraphicsState;
    fn set_graphics_state(&mut self, state: GraphicsState);

    fn fill_rect(&mut self, rect: SlotRect, color: u32);
    fn stroke_rect(&mut self, rect: SlotRect, color: u32);
    /// Draw a texture stretched over `rect`, tinted by the current colour.
    fn blit(&mut self, texture: egui::TextureId, rect: SlotRect);
    fn text(&mut self, x: i32, y: i32, text: &str, font: &egui::FontId, color: u32);
    /// Floating tooltip box anchored at `(x, y)`.
    fn tooltip(&mut self, x: i32, y: i32, lines: &[TooltipLine], font: &egui::FontId);
}

/// Something drawn beneath an ingredient, e.g. a slot frame.
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface, x: i32, y: i32);
}

/// Scoped access to a surface. Dropping the guard re-enables lighting and the
/// depth test and resets the colour to opaque white, on every exit path.
pub struct GraphicsGuard<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> GraphicsGuard<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self { surface }
    }

    pub fn disable_lighting(&mut self) {
        let state = self.surface.graphics_state();
        self.surface.set_graphics_state(GraphicsState { lighting: false, ..state });
    }

    pub fn disable_depth_test(&mut self) {
        let state = self.surface.graphics_state();
        self.surface.set_graphics_state(GraphicsState { depth_test: false, ..state });
    }

    pub fn set_color(&mut self, color: u32) {
        let state = self.surface.graphics_state();
        self.surface.set_graphics_state(GraphicsState { color, ..state });
    }
}

impl<'a> Deref for GraphicsGuard<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for GraphicsGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for GraphicsGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_graphics_state(GraphicsState::RESTORED);
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Fill(SlotRect, u32),
        Stroke(SlotRect, u32),
        Blit(SlotRect),
        Text(i32, i32, String),
        Tooltip(i32, i32, Vec<TooltipLine>),
    }

    /// Surface that records every primitive together with the state it ran under.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub state: GraphicsState,
        pub ops: Vec<(Op, GraphicsState)>,
    }

    impl RecordingSurface {
        pub fn tooltips(&self) -> Vec<&Vec<TooltipLine>> {
            self.ops
                .iter()
                .filter_map(|(op, _)| match op {
                    Op::Tooltip(_, _, lines) => Some(lines),
                    _ => None,
                })
                .collect()
        }

        pub fn fills(&self) -> Vec<(SlotRect, u32)> {
            self.ops
                .iter()
                .filter_map(|(op, _)| match op {
                    Op::Fill(rect, color) => Some((*rect, *color)),
                    _ => None,
                })
                .collect()
        }

        fn record(&mut self, op: Op) {
            self.ops.push((op, self.state));
        }
    }

    impl Surface for RecordingSurface {
        fn graphics_state(&self) -> GraphicsState {
            self.state
        }

        fn set_graphics_state(&mut self, state: GraphicsState) {
            self.state = state;
        }

        fn fill_rect(&mut self, rect: SlotRect, color: u32) {
            self.record(Op::Fill(rect, color));
        }

        fn stroke_rect(&mut self, rect: SlotRect, color: u32) {
            self.record(Op::Stroke(rect, color));
        }

        fn blit(&mut self, _texture: egui::TextureId, rect: SlotRect) {
            self.record(Op::Blit(rect));
        }

        fn text(&mut self, x: i32, y: i32, text: &str, _font: &egui::FontId, _color: u32) {
            self.record(Op::Text(x, y, text.to_string()));
        }

        fn tooltip(&mut self, x: i32, y: i32, lines: &[TooltipLine], _font: &egui::FontId) {
            self.record(Op::Tooltip(x, y, lines.to_vec()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSurface;
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = SlotRect::new(10, 20, 18, 18);
        assert!(rect.contains(10, 20));
        assert!(rect.contains(27, 37));
        assert!(!rect.contains(28, 20));
        assert!(!rect.contains(10, 38));
        assert!(!rect.contains(9, 25));
    }

    #[test]
    fn test_inset_shrinks_both_sides() {
        assert_eq!(SlotRect::new(0, 0, 18, 18).inset(1, 2), SlotRect::new(1, 2, 16, 14));
    }

    #[test]
    fn test_guard_restores_state_on_drop() {
        let mut surface = RecordingSurface::default();
        {
            let mut gfx = GraphicsGuard::new(&mut surface);
            gfx.disable_lighting();
            gfx.disable_depth_test();
            gfx.set_color(0x8000_0000);
            gfx.fill_rect(SlotRect::new(0, 0, 1, 1), 0xFF00_0000);
        }
        assert_eq!(surface.state, GraphicsState::RESTORED);
        let during = surface.ops[0].1;
        assert!(!during.lighting);
        assert!(!during.depth_test);
        assert_eq!(during.color, 0x8000_0000);
    }

    #[test]
    fn test_guard_restores_after_early_return() {
        fn fails(surface: &mut dyn Surface) -> Result<(), ()> {
            let mut gfx = GraphicsGuard::new(surface);
            gfx.disable_depth_test();
            Err(())
        }
        let mut surface = RecordingSurface::default();
        assert!(fails(&mut surface).is_err());
        assert!(surface.state.depth_test);
    }
}
