//! Page composition.
//!
//! Renders each block to its own canvas and stacks the results top to
//! bottom, appending a tear-off margin at the bottom. Per-block failures
//! and unknown block types become warnings; one bad block never sinks the
//! rest of the page.

use log::warn;

use super::schema::Block;
use super::{image, text, Canvas, Page, RenderContext};

/// Blank tear-off margin appended below the last block, in dots.
pub const BOTTOM_MARGIN: u32 = 40;

/// Render an ordered block list into a page.
///
/// Returns `None` when no block produced a canvas, alongside one warning
/// per skipped or failed block in input order.
pub fn compose(blocks: &[Block], ctx: &RenderContext) -> (Option<Page>, Vec<String>) {
    let mut canvases = Vec::with_capacity(blocks.len() + 1);
    let mut warnings = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        let rendered = match block {
            Block::Text(b) => text::render_text(b, ctx),
            Block::Title(b) => text::render_title(b, ctx),
            Block::List(b) => text::render_list(b, ctx),
            Block::Separator(b) => text::render_separator(b, ctx),
            Block::ImageUrl(b) => image::render_image_url(b, ctx),
            Block::ImageB64(b) => image::render_image_b64(b, ctx),
            Block::Unknown(tag) => {
                let message = format!("Block #{}: unknown type '{}', skipped", i, tag);
                warn!("{}", message);
                warnings.push(message);
                continue;
            }
        };

        match rendered {
            Ok(canvas) => canvases.push(canvas),
            Err(e) => {
                let message = format!("Block #{} ({}): {}", i, block.tag(), e);
                warn!("{}", message);
                warnings.push(message);
            }
        }
    }

    if canvases.is_empty() {
        return (None, warnings);
    }

    canvases.push(Canvas::blank(ctx.width, BOTTOM_MARGIN));
    (Some(Page::new(canvases)), warnings)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FallbackTypeface, FontProvider, FontSet};
    use crate::layout::schema::{ListBlock, SeparatorBlock, TextBlock};
    use std::sync::Arc;

    struct FixedFonts;
    impl FontProvider for FixedFonts {
        fn resolve(&self, size: u32, _bold: bool, _name: Option<&str>) -> FontSet {
            FontSet::new(Arc::new(FallbackTypeface::new(size)), None)
        }
    }

    fn ctx() -> RenderContext {
        RenderContext::new(384, 24, Arc::new(FixedFonts))
    }

    #[test]
    fn empty_input_produces_no_page_and_no_warnings() {
        let (page, warnings) = compose(&[], &ctx());
        assert!(page.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn page_height_is_block_sum_plus_margin() {
        let blocks = vec![
            Block::Title(TextBlock {
                text: "Hello".into(),
                ..Default::default()
            }),
            Block::Separator(SeparatorBlock::default()),
            Block::List(ListBlock {
                items: vec!["A".into(), "B".into()],
                ..Default::default()
            }),
        ];
        let (page, warnings) = compose(&blocks, &ctx());
        let page = page.unwrap();
        assert!(warnings.is_empty());
        // Three block canvases plus the bottom margin
        assert_eq!(page.canvases().len(), 4);
        let sum: u32 = page.canvases().iter().map(|c| c.height()).sum();
        assert_eq!(page.height(), sum);
        assert_eq!(page.canvases().last().unwrap().height(), BOTTOM_MARGIN);
        assert_eq!(page.width(), 384);
    }

    #[test]
    fn unknown_blocks_are_skipped_with_a_warning() {
        let blocks = vec![
            Block::Unknown("bogus".into()),
            Block::Text(TextBlock {
                text: "still prints".into(),
                ..Default::default()
            }),
        ];
        let (page, warnings) = compose(&blocks, &ctx());
        assert!(page.is_some());
        assert_eq!(warnings, vec!["Block #0: unknown type 'bogus', skipped"]);
    }

    #[test]
    fn all_unrenderable_yields_none_with_all_warnings() {
        let blocks = vec![
            Block::Unknown("a".into()),
            Block::Unknown("b".into()),
            Block::ImageB64(Default::default()),
        ];
        let (page, warnings) = compose(&blocks, &ctx());
        assert!(page.is_none());
        assert_eq!(warnings.len(), 3);
        assert!(warnings[2].starts_with("Block #2 (image_b64):"));
    }

    #[test]
    fn failed_block_does_not_stop_later_blocks() {
        let blocks = vec![
            Block::ImageB64(Default::default()),
            Block::Separator(SeparatorBlock::default()),
        ];
        let (page, warnings) = compose(&blocks, &ctx());
        let page = page.unwrap();
        assert_eq!(warnings.len(), 1);
        // Separator canvas plus the margin
        assert_eq!(page.canvases().len(), 2);
    }
}
