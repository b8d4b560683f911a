//! Rasterization of a [`ComparisonLayout`] into a PNG.

use std::io::Cursor;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use anyhow::{Context, Result};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use log::info;

use crate::render::layout::{ComparisonLayout, FontKind, Section, TextDraw, TextMeasure};

const HEADER_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BLOCK_BACKGROUND: Rgba<u8> = Rgba([28, 28, 30, 255]);

/// The two TrueType faces every text is printed with.
#[derive(Clone)]
pub struct FontBook {
    regular: FontArc,
    bold: FontArc,
}

impl FontBook {
    /// Loads the regular and bold faces from TTF/OTF files.
    pub fn load(regular_path: &str, bold_path: &str) -> Result<Self> {
        Ok(FontBook {
            regular: load_font(regular_path)?,
            bold: load_font(bold_path)?,
        })
    }

    fn face(&self, font: FontKind) -> &FontArc {
        if font.is_bold() { &self.bold } else { &self.regular }
    }

    /// Prints `draw` on `image`, `offset` pixels below the top of the canvas.
    pub fn draw_text(&self, image: &mut RgbaImage, draw: &TextDraw, offset: u32) {
        let face = self.face(draw.font);
        let scale = PxScale::from(draw.font.size());
        let scaled = face.as_scaled(scale);
        let color = draw.font.color();

        let mut caret = draw.left(self.text_width(draw.font, &draw.text));
        let baseline = offset as f32 + draw.y + scaled.ascent();
        let mut previous: Option<GlyphId> = None;

        for c in draw.text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = face.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + i64::from(gx);
                let y = bounds.min.y as i64 + i64::from(gy);
                let outside = x < 0
                    || y < 0
                    || x >= i64::from(image.width())
                    || y >= i64::from(image.height());
                if outside {
                    return;
                }
                blend(image.get_pixel_mut(x as u32, y as u32), color, coverage);
            });
        }
    }
}

impl TextMeasure for FontBook {
    fn text_width(&self, font: FontKind, text: &str) -> f32 {
        let scaled = self.face(font).as_scaled(PxScale::from(font.size()));
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }

        width
    }
}

fn load_font(path: &str) -> Result<FontArc> {
    let data = std::fs::read(path).with_context(|| format!("failed to read font {}", path))?;
    let font = FontArc::try_from_vec(data).with_context(|| format!("invalid font {}", path))?;
    info!("loaded font {}", path);
    Ok(font)
}

fn blend(pixel: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let coverage = coverage.clamp(0.0, 1.0);
    for channel in 0..3 {
        let background = f32::from(pixel[channel]);
        let foreground = f32::from(color[channel]);
        pixel[channel] = (background + (foreground - background) * coverage).round() as u8;
    }
    pixel[3] = 255;
}

/// Allocates the canvas at its final size and fills every section background.
pub fn paint_panels(layout: &ComparisonLayout) -> RgbaImage {
    let mut image = RgbaImage::new(layout.width, layout.height);

    for placed in &layout.sections {
        let background = match placed.section {
            Section::Header | Section::NoData => HEADER_BACKGROUND,
            Section::FirstPerson | Section::ThirdPerson => BLOCK_BACKGROUND,
        };
        let end = (placed.offset + placed.section.height()).min(layout.height);
        for y in placed.offset..end {
            for x in 0..layout.width {
                image.put_pixel(x, y, background);
            }
        }
    }

    image
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}
