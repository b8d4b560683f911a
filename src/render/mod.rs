//! Comparison image rendering.
//!
//! - [`stats_view`]: display values derived from the raw statistics
//! - [`layout`]: sections, heights and text placement, independent of fonts
//! - [`canvas`]: rasterization and PNG encoding
//!
//! [`ComparisonRenderer::render`] chains the three. It never touches the
//! network, and only fails if PNG encoding fails.

mod canvas;
mod layout;
mod stats_view;

use image::ImageError;
use log::debug;

pub use crate::render::canvas::FontBook;
pub use crate::render::layout::Section;
use crate::{
    compare::ComparisonRequest,
    pubg::{ModeFamily, SeasonStats},
    render::{
        canvas::{encode_png, paint_panels},
        layout::layout_comparison,
    },
};

/// An encoded comparison image and what it contains.
#[derive(Debug, Clone)]
pub struct RenderedComparison {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Sections in draw order, top to bottom
    pub sections: Vec<Section>,
}

/// Renders comparisons with a loaded [`FontBook`].
#[derive(Clone)]
pub struct ComparisonRenderer {
    fonts: FontBook,
}

impl ComparisonRenderer {
    pub fn new(fonts: FontBook) -> Self {
        ComparisonRenderer { fonts }
    }

    /// Renders the `family` comparison of two players.
    ///
    /// # Arguments
    ///
    /// * `request` - Names, region and season printed in the header
    /// * `stats_a` - Season statistics of `request.player_a`
    /// * `stats_b` - Season statistics of `request.player_b`
    /// * `family` - Mode family whose first and third person blocks are drawn
    ///
    /// # Panics
    ///
    /// Panics if a statistic is not finite.
    pub fn render(
        &self,
        request: &ComparisonRequest,
        stats_a: &SeasonStats,
        stats_b: &SeasonStats,
        family: ModeFamily,
    ) -> Result<RenderedComparison, ImageError> {
        let layout = layout_comparison(request, stats_a, stats_b, family, &self.fonts);

        let mut image = paint_panels(&layout);
        for placed in &layout.sections {
            for draw in &placed.draws {
                self.fonts.draw_text(&mut image, draw, placed.offset);
            }
        }

        let png = encode_png(&image)?;

        debug!(
            "rendered {:?} comparison {}x{} ({} bytes)",
            family,
            layout.width,
            layout.height,
            png.len()
        );

        Ok(RenderedComparison {
            png,
            width: layout.width,
            height: layout.height,
            sections: layout.sections.iter().map(|placed| placed.section).collect(),
        })
    }
}

#[cfg(test)]
pub mod testing {
    use crate::render::FontBook;

    pub const REGULAR_FONT: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fonts/DejaVuSansMono.ttf");
    pub const BOLD_FONT: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fonts/DejaVuSansMono-Bold.ttf");

    pub fn font_book() -> FontBook {
        FontBook::load(REGULAR_FONT, BOLD_FONT).unwrap()
    }
}
