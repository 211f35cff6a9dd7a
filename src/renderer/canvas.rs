//! Canvas 2D backend
//!
//! Executes a draw list on an `HtmlCanvasElement`'s 2D context.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::frame::{DrawCommand, build_frame};
use crate::error::{AssetError, Result};
use crate::platform::assets::SpriteSheet;
use crate::sim::{Rect, Snapshot};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, sprites: SpriteSheet) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| AssetError::dom(format!("get_context failed: {:?}", e)))?
            .ok_or_else(|| AssetError::dom("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AssetError::dom("context is not CanvasRenderingContext2d"))?;
        Ok(Self { ctx, sprites })
    }

    /// Draw one frame of the snapshot
    pub fn render(&self, snapshot: &Snapshot<'_>) {
        for command in build_frame(snapshot) {
            self.execute(&command);
        }
    }

    fn execute(&self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear { width, height } => {
                self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCommand::Sprite {
                key,
                bounds,
                fallback,
            } => match self.sprites.get(*key) {
                Some(img) => {
                    if let Err(e) = self
                        .ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            bounds.x as f64,
                            bounds.y as f64,
                            bounds.width as f64,
                            bounds.height as f64,
                        )
                    {
                        log::warn!("drawImage {:?} failed: {:?}", key, e);
                    }
                }
                None => self.fill_rect(bounds, fallback),
            },
            DrawCommand::FillRect { bounds, color } => self.fill_rect(bounds, color),
            DrawCommand::Text {
                text,
                x,
                y,
                font,
                color,
            } => {
                self.ctx.set_font(font);
                self.ctx.set_fill_style_str(color);
                if let Err(e) = self.ctx.fill_text(text, *x as f64, *y as f64) {
                    log::warn!("fillText failed: {:?}", e);
                }
            }
        }
    }

    fn fill_rect(&self, bounds: &Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            bounds.x as f64,
            bounds.y as f64,
            bounds.width as f64,
            bounds.height as f64,
        );
    }
}
