use std::collections::HashMap;

use crate::game::fluids::FluidId;
use crate::game::items::{IconParams, IconShape, ItemId};

/// Pixel size icons are rasterized at. Slots scale them to fit.
pub const ICON_SIZE: usize = 32;

/// Procedurally drawn icon textures for every item and fluid.
pub struct IconAtlas {
    items: HashMap<ItemId, egui::TextureHandle>,
    fluids: HashMap<FluidId, egui::TextureHandle>,
}

impl IconAtlas {
    pub fn generate(ctx: &egui::Context) -> Self {
        let load = |name: &str, params: &IconParams| {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [ICON_SIZE, ICON_SIZE],
                &rasterize_icon(params, ICON_SIZE, ICON_SIZE),
            );
            ctx.load_texture(name, image, egui::TextureOptions::NEAREST)
        };

        let items = ItemId::all()
            .iter()
            .map(|&item| (item, load(item.display_name(), &item.icon_params())))
            .collect();
        let fluids = FluidId::all()
            .iter()
            .map(|&fluid| (fluid, load(fluid.display_name(), &fluid.icon_params())))
            .collect();

        Self { items, fluids }
    }

    pub fn item(&self, item: ItemId) -> Option<egui::TextureId> {
        self.items.get(&item).map(egui::TextureHandle::id)
    }

    pub fn fluid(&self, fluid: FluidId) -> Option<egui::TextureId> {
        self.fluids.get(&fluid).map(egui::TextureHandle::id)
    }
}

/// RGBA bytes, row-major, `w * h * 4` long.
pub fn rasterize_icon(params: &IconParams, w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * 4];
    let cx = w as f32 / 2.0;
    let cy = h as f32 / 2.0;
    let radius = (w.min(h) as f32 / 2.0) - 1.5;

    for y in 0..h {
        for x in 0..w {
            let px = x as f32 + 0.5 - cx;
            let py = y as f32 + 0.5 - cy;
            let dist = sdf_shape(params.shape, px, py, radius);

            let (rgb, alpha) = if dist < 0.0 {
                // Inside: blend from the rim colour to the core colour
                let t = (-dist / radius).min(1.0);
                let rgb = [0, 1, 2].map(|c| lerp(params.secondary_color[c], params.primary_color[c], t));
                (rgb, 1.0)
            } else if dist < 1.5 {
                (params.secondary_color, 1.0 - dist / 1.5)
            } else {
                continue;
            };

            let i = (y * w + x) * 4;
            pixels[i] = (rgb[0] * 255.0) as u8;
            pixels[i + 1] = (rgb[1] * 255.0) as u8;
            pixels[i + 2] = (rgb[2] * 255.0) as u8;
            pixels[i + 3] = (alpha * 255.0) as u8;
        }
    }

    pixels
}

fn sdf_shape(shape: IconShape, px: f32, py: f32, radius: f32) -> f32 {
    let (ax, ay) = (px.abs(), py.abs());
    let k = 3.0_f32.sqrt();
    match shape {
        IconShape::Circle => (px * px + py * py).sqrt() - radius,
        IconShape::Square => {
            let r = radius * 0.75;
            (ax - r).max(ay - r)
        }
        IconShape::Triangle => {
            // Equilateral, pointing up
            let r = radius * 0.85;
            let shifted = py + r * 0.35;
            (ax * k / 2.0 + shifted / 2.0 - r * 0.5).max(-shifted - r * 0.35)
        }
        IconShape::Hexagon => (ax * k / 2.0 + ay / 2.0).max(ay) - radius * 0.85,
        IconShape::Diamond => {
            let r = radius * 0.85;
            (ax + ay - r) * std::f32::consts::FRAC_1_SQRT_2
        }
        IconShape::Octagon => {
            ax.max(ay).max((ax + ay) * std::f32::consts::FRAC_1_SQRT_2) - radius * 0.8
        }
        IconShape::Star => {
            // Five points: the radius swings between outer and inner per sector
            let r = radius * 0.85;
            let inner = r * 0.4;
            let sector = (py.atan2(px) * 5.0 / std::f32::consts::TAU + 0.5).fract() - 0.5;
            let star_r = r - (r - inner) * (sector.abs() * 2.0).min(1.0);
            (px * px + py * py).sqrt() - star_r
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
