//! Preview rasterization for the assemble stage.
//!
//! A fixed-size, fixed-wrap rendition good enough for eyeballing a deck
//! before committing to the print-resolution pipeline. If no usable font is
//! available the whole step is skipped with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::RgbImage;
use imageproc::drawing::draw_text_mut;
use serde::{Deserialize, Serialize};

use crate::card::CardKind;
use crate::deck::Deck;
use crate::error::Result;

use super::{card_colors, file_prefix, load_font};

/// Preview card geometry (2.5" x 3.5" at 300 DPI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewLayout {
    #[serde(default = "default_card_w")]
    pub card_w: u32,
    #[serde(default = "default_card_h")]
    pub card_h: u32,
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_footer_font_size")]
    pub footer_font_size: u32,
    /// Character count per wrapped line
    #[serde(default = "default_wrap_columns")]
    pub wrap_columns: usize,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: u32,
}

impl Default for PreviewLayout {
    fn default() -> Self {
        Self {
            card_w: default_card_w(),
            card_h: default_card_h(),
            margin: default_margin(),
            font_size: default_font_size(),
            footer_font_size: default_footer_font_size(),
            wrap_columns: default_wrap_columns(),
            line_spacing: default_line_spacing(),
        }
    }
}

fn default_card_w() -> u32 {
    750
}

fn default_card_h() -> u32 {
    1050
}

fn default_margin() -> u32 {
    60
}

fn default_font_size() -> u32 {
    32
}

fn default_footer_font_size() -> u32 {
    18
}

fn default_wrap_columns() -> usize {
    30
}

fn default_line_spacing() -> u32 {
    8
}

/// Greedy wrap on character count, the preview's cheap stand-in for pixel
/// measurement.
pub fn wrap_columns(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render preview cards for the whole deck under `out_dir`, one folder per
/// category. Returns the number of images written; 0 with a warning when no
/// configured font is usable.
pub fn render_previews(
    deck: &Deck,
    out_dir: &Path,
    layout: &PreviewLayout,
    font_candidates: &[PathBuf],
    game_name: &str,
) -> Result<usize> {
    let font = match load_font(font_candidates) {
        Ok(font) => font,
        Err(_) => {
            tracing::warn!("no usable font found, skipping preview image generation");
            return Ok(0);
        }
    };

    let mut count = 0;
    for kind in CardKind::ALL {
        let dir = out_dir.join(kind.plural());
        fs::create_dir_all(&dir)?;
        for (i, text) in deck.by_kind(kind).iter().enumerate() {
            let img = preview_card(text, kind, layout, &font, game_name);
            img.save(dir.join(format!("{}_{:03}.png", file_prefix(kind), i + 1)))?;
            count += 1;
        }
    }
    Ok(count)
}

fn preview_card(
    text: &str,
    kind: CardKind,
    layout: &PreviewLayout,
    font: &FontVec,
    game_name: &str,
) -> RgbImage {
    let (bg, fg) = card_colors(kind);
    let mut img = RgbImage::from_pixel(layout.card_w, layout.card_h, bg);

    let scale = PxScale::from(layout.font_size as f32);
    let line_h = (layout.font_size + layout.line_spacing) as i32;
    for (i, line) in wrap_columns(text, layout.wrap_columns).iter().enumerate() {
        draw_text_mut(
            &mut img,
            fg,
            layout.margin as i32,
            layout.margin as i32 + i as i32 * line_h,
            scale,
            font,
            line,
        );
    }

    let footer_scale = PxScale::from(layout.footer_font_size as f32);
    let footer_y = layout.card_h as i32 - layout.margin as i32 - 20;
    draw_text_mut(&mut img, fg, layout.margin as i32, footer_y, footer_scale, font, game_name);

    img
}
