//! Print-resolution card rasterization.
//!
//! Each curated card is drawn onto a category template: the text is greedily
//! word-wrapped against a pixel budget, the font size found by a descending
//! scan until the wrapped block fits, and a small card-stack mark plus the
//! game name replace the template's stock footer.

pub mod archive;
pub mod preview;

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

use crate::card::CardKind;
use crate::error::{DeckError, Result};

/// Pixel layout for the print-resolution card face (2.5" x 3.5" at 1200 DPI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderLayout {
    #[serde(default = "default_card_w")]
    pub card_w: u32,
    #[serde(default = "default_card_h")]
    pub card_h: u32,

    /// Text box origin
    #[serde(default = "default_text_x")]
    pub text_x: i32,
    #[serde(default = "default_text_y")]
    pub text_y: i32,

    /// Text box extent; wrapped text must fit inside
    #[serde(default = "default_text_width")]
    pub text_width: u32,
    #[serde(default = "default_text_height")]
    pub text_height: u32,

    /// Font-fit scan bounds
    #[serde(default = "default_font_size_max")]
    pub font_size_max: u32,
    #[serde(default = "default_font_size_min")]
    pub font_size_min: u32,
    #[serde(default = "default_font_step")]
    pub font_step: u32,

    #[serde(default = "default_line_spacing")]
    pub line_spacing: u32,

    /// Footer region covered before the mark is drawn
    #[serde(default = "default_logo_cover_y")]
    pub logo_cover_y: i32,
    #[serde(default = "default_logo_text_y")]
    pub logo_text_y: i32,
    #[serde(default = "default_logo_icon_size")]
    pub logo_icon_size: i32,
    #[serde(default = "default_logo_font_size")]
    pub logo_font_size: u32,

    /// Font size for the stacked game-name words on card backs
    #[serde(default = "default_back_font_size")]
    pub back_font_size: u32,
}

impl Default for RenderLayout {
    fn default() -> Self {
        Self {
            card_w: default_card_w(),
            card_h: default_card_h(),
            text_x: default_text_x(),
            text_y: default_text_y(),
            text_width: default_text_width(),
            text_height: default_text_height(),
            font_size_max: default_font_size_max(),
            font_size_min: default_font_size_min(),
            font_step: default_font_step(),
            line_spacing: default_line_spacing(),
            logo_cover_y: default_logo_cover_y(),
            logo_text_y: default_logo_text_y(),
            logo_icon_size: default_logo_icon_size(),
            logo_font_size: default_logo_font_size(),
            back_font_size: default_back_font_size(),
        }
    }
}

fn default_card_w() -> u32 {
    3288
}

fn default_card_h() -> u32 {
    4488
}

fn default_text_x() -> i32 {
    444
}

fn default_text_y() -> i32 {
    444
}

fn default_text_width() -> u32 {
    2400
}

fn default_text_height() -> u32 {
    2800
}

fn default_font_size_max() -> u32 {
    200
}

fn default_font_size_min() -> u32 {
    110
}

fn default_font_step() -> u32 {
    5
}

fn default_line_spacing() -> u32 {
    75
}

fn default_logo_cover_y() -> i32 {
    3700
}

fn default_logo_text_y() -> i32 {
    3850
}

fn default_logo_icon_size() -> i32 {
    140
}

fn default_logo_font_size() -> u32 {
    100
}

fn default_back_font_size() -> u32 {
    500
}

/// `(background, foreground)` per category: prompts print black on white
/// text, responses the inverse.
pub fn card_colors(kind: CardKind) -> (Rgb<u8>, Rgb<u8>) {
    match kind {
        CardKind::Prompt => (Rgb([0, 0, 0]), Rgb([255, 255, 255])),
        CardKind::Response => (Rgb([255, 255, 255]), Rgb([0, 0, 0])),
    }
}

/// Template bitmap file name per category.
pub fn template_file(kind: CardKind) -> &'static str {
    match kind {
        CardKind::Prompt => "black.png",
        CardKind::Response => "white.png",
    }
}

/// Output folder name per category, as print shops expect them.
pub fn output_dir_name(kind: CardKind) -> &'static str {
    match kind {
        CardKind::Prompt => "prompts_black",
        CardKind::Response => "responses_white",
    }
}

/// Image file prefix per category.
pub fn file_prefix(kind: CardKind) -> &'static str {
    match kind {
        CardKind::Prompt => "prompt",
        CardKind::Response => "response",
    }
}

/// Card back file name per category.
pub fn back_file(kind: CardKind) -> &'static str {
    match kind {
        CardKind::Prompt => "back_black.png",
        CardKind::Response => "back_white.png",
    }
}

/// Load the first parseable font from the candidate list.
pub fn load_font(candidates: &[PathBuf]) -> Result<FontVec> {
    for path in candidates {
        let Ok(data) = std::fs::read(path) else {
            continue;
        };
        if let Ok(font) = FontVec::try_from_vec(data) {
            tracing::debug!("using font {}", path.display());
            return Ok(font);
        }
    }
    Err(DeckError::FontUnavailable)
}

/// Greedy word wrap against a pixel width budget.
///
/// A word wider than the budget gets a line of its own rather than being
/// broken.
pub fn wrap_to_width(text: &str, font: &FontVec, scale: PxScale, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        let (width, _) = text_size(scale, font, &candidate);
        if width <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Height of a wrapped block: one nominal line height per line plus spacing
/// between lines.
fn block_height(lines: usize, scale: PxScale, spacing: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let line_h = scale.y.ceil() as u32;
    lines as u32 * line_h + (lines as u32 - 1) * spacing
}

/// Largest size in the descending scan whose wrapped text fits the text box.
/// Bottoms out at the configured minimum.
pub fn fit_font_size(text: &str, font: &FontVec, layout: &RenderLayout) -> u32 {
    let mut size = layout.font_size_max;
    while size > layout.font_size_min {
        let scale = PxScale::from(size as f32);
        let lines = wrap_to_width(text, font, scale, layout.text_width);
        if block_height(lines.len(), scale, layout.line_spacing) <= layout.text_height {
            return size;
        }
        size = size.saturating_sub(layout.font_step);
    }
    layout.font_size_min
}

fn draw_lines(
    img: &mut RgbImage,
    lines: &[String],
    x: i32,
    y: i32,
    scale: PxScale,
    spacing: u32,
    color: Rgb<u8>,
    font: &FontVec,
) {
    let line_h = scale.y.ceil() as i32 + spacing as i32;
    for (i, line) in lines.iter().enumerate() {
        draw_text_mut(img, color, x, y + i as i32 * line_h, scale, font, line);
    }
}

/// Load a category's template bitmap. A missing template is fatal.
pub fn load_template(template_dir: &Path, kind: CardKind) -> Result<RgbImage> {
    let path = template_dir.join(template_file(kind));
    if !path.is_file() {
        return Err(DeckError::MissingInput(format!("template {}", path.display())));
    }
    Ok(image::open(&path)?.to_rgb8())
}

/// Cover the template's stock footer and draw the game's own mark: a small
/// two-card stack icon plus the game name. Done once per template, reused
/// for every card.
pub fn rebrand_template(
    mut img: RgbImage,
    kind: CardKind,
    layout: &RenderLayout,
    font: &FontVec,
    game_name: &str,
) -> RgbImage {
    let (bg, fg) = card_colors(kind);

    let cover_x = (layout.text_x - 50).max(0);
    let cover_w = layout.card_w.saturating_sub(cover_x as u32 + 200);
    let cover_h = (layout.card_h as i32 - 200 - layout.logo_cover_y).max(1) as u32;
    draw_filled_rect_mut(
        &mut img,
        Rect::at(cover_x, layout.logo_cover_y).of_size(cover_w.max(1), cover_h),
        bg,
    );

    let icon = layout.logo_icon_size;
    let (icon_x, icon_y) = (layout.text_x, layout.logo_text_y - 20);
    let card_w = (icon - 30).max(1) as u32;
    let card_h = icon.max(1) as u32;

    // Back card of the stack, offset down and right.
    draw_filled_rect_mut(
        &mut img,
        Rect::at(icon_x + 15, icon_y + 10).of_size(card_w, card_h),
        fg,
    );
    // Front card: background fill with a foreground outline.
    draw_filled_rect_mut(&mut img, Rect::at(icon_x, icon_y).of_size(card_w, card_h), bg);
    for inset in 0..4 {
        let w = card_w.saturating_sub(2 * inset as u32).max(1);
        let h = card_h.saturating_sub(2 * inset as u32).max(1);
        draw_hollow_rect_mut(&mut img, Rect::at(icon_x + inset, icon_y + inset).of_size(w, h), fg);
    }

    let scale = PxScale::from(layout.logo_font_size as f32);
    draw_text_mut(
        &mut img,
        fg,
        icon_x + icon + 30,
        layout.logo_text_y,
        scale,
        font,
        game_name,
    );

    img
}

/// Draw one card's text onto a prepared template.
pub fn render_card(
    template: &RgbImage,
    text: &str,
    kind: CardKind,
    layout: &RenderLayout,
    font: &FontVec,
) -> RgbImage {
    let (_, fg) = card_colors(kind);
    let mut img = template.clone();

    let size = fit_font_size(text, font, layout);
    let scale = PxScale::from(size as f32);
    let lines = wrap_to_width(text, font, scale, layout.text_width);
    draw_lines(
        &mut img,
        &lines,
        layout.text_x,
        layout.text_y,
        scale,
        layout.line_spacing,
        fg,
        font,
    );

    img
}

/// Solid-color card back with the game name as large stacked words.
pub fn render_back(
    kind: CardKind,
    layout: &RenderLayout,
    font: &FontVec,
    game_name: &str,
) -> RgbImage {
    let (bg, fg) = card_colors(kind);
    let mut img = RgbImage::from_pixel(layout.card_w, layout.card_h, bg);

    let scale = PxScale::from(layout.back_font_size as f32);
    let step = (layout.back_font_size as f32 * 1.16) as i32;
    let mut y = 400;
    for word in game_name.split_whitespace() {
        draw_text_mut(&mut img, fg, layout.text_x, y, scale, font, word);
        y += step;
    }

    img
}
