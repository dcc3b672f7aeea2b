use super::layout::{focal_length_px, projected_size, wrap_words};
use crate::constants::{LABEL_FONT_FAMILY, LABEL_LAYER_ID, LABEL_LINE_SPACING, LABEL_MIN_PX};
use crate::dom;
use glam::Mat4;
use ripple_core::camera::world_to_pixel;
use ripple_core::scene::{Drawable, SceneFrame};
use ripple_core::Lens;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Text ripples drawn on a 2D canvas stacked over the WebGPU canvas.
pub struct LabelLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl LabelLayer {
    pub fn mount(document: &web::Document, over: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = dom::create_element(document, "canvas")?;
        canvas.set_id(LABEL_LAYER_ID);
        dom::set_style(
            &canvas,
            "position:fixed;left:0;top:0;width:100%;height:100%;pointer-events:none",
        );
        let parent = over
            .parent_node()
            .ok_or_else(|| anyhow::anyhow!("canvas has no parent"))?;
        dom::append(&parent, &canvas)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }

    pub fn draw(&self, frame: &SceneFrame, view_proj: &Mat4, lens: &Lens, width: u32, height: u32) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        let (w, h) = (width as f32, height as f32);
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        let focal = focal_length_px(lens.fovy_radians, h);

        let mut visible: Vec<_> = frame
            .labels()
            .filter_map(|item| {
                world_to_pixel(view_proj, item.position, w, h).map(|p| (p, &item.drawable))
            })
            .collect();
        // Far to near so closer labels paint on top.
        visible.sort_by(|a, b| b.0.z.total_cmp(&a.0.z));

        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        for (p, drawable) in visible {
            let Drawable::Label {
                text,
                font_size,
                max_width,
                color,
            } = drawable
            else {
                continue;
            };
            let px = projected_size(*font_size, p.z, focal);
            if px < LABEL_MIN_PX {
                continue;
            }
            let max_px = projected_size(*max_width, p.z, focal);
            self.ctx
                .set_font(&format!("{:.1}px {}", px, LABEL_FONT_FAMILY));
            self.ctx.set_fill_style_str(&format!(
                "rgb({}, {}, {})",
                (color[0] * 255.0) as u8,
                (color[1] * 255.0) as u8,
                (color[2] * 255.0) as u8
            ));
            let lines = wrap_words(text, max_px, |s| {
                self.ctx
                    .measure_text(s)
                    .map(|m| m.width() as f32)
                    .unwrap_or(0.0)
            });
            let step = px * LABEL_LINE_SPACING;
            let top = p.y - step * (lines.len() as f32 - 1.0) * 0.5;
            for (i, line) in lines.iter().enumerate() {
                _ = self
                    .ctx
                    .fill_text(line, p.x as f64, (top + step * i as f32) as f64);
            }
        }
    }
}

impl Drop for LabelLayer {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}
