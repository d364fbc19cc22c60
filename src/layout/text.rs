//! Text, title, list and separator renderers.
//!
//! All text flows through the same path: normalize line breaks, word-wrap to
//! an approximate character budget, then measure and draw line by line with
//! per-character emoji dispatch (see [`crate::font`]).

use crate::error::PaginitaError;
use crate::layout::schema::{Align, ListBlock, SeparatorBlock, TextBlock};
use crate::layout::{Canvas, RenderContext};

/// Left/right text margin in dots.
const TEXT_MARGIN: i32 = 8;

/// Default vertical padding for text and list blocks.
const DEFAULT_PADDING: u32 = 4;

/// Title defaults: padding and size bump over the base font size.
const TITLE_PADDING: u32 = 6;
const TITLE_SIZE_BUMP: u32 = 6;

/// Horizontal space reserved for the hanging bullet in list blocks.
const LIST_INDENT_RESERVE: u32 = 24;

/// Separator geometry.
const SEPARATOR_HEIGHT: u32 = 12;
const SEPARATOR_MARGIN: i32 = 10;
const SEPARATOR_SHADE: u8 = 180;
const DOT_SPACING: usize = 6;

/// Character budget per line for the given width and font size.
fn max_chars(width: u32, font_size: u32, aspect: f32) -> usize {
    ((width as f32 / (font_size as f32 * aspect)) as usize).max(10)
}

/// Greedy word wrap to a character budget. Words longer than the budget are
/// hard-broken. Whitespace runs collapse, like `textwrap`.
pub fn wrap(text: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let word_len = word.chars().count();
            let sep = usize::from(current_len > 0);
            if current_len + sep + word_len <= budget {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_len += sep + word_len;
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // Single word over budget: hard break
            let split_at = word
                .char_indices()
                .nth(budget)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
            if word.is_empty() {
                break;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split into paragraphs on normalized line breaks, wrapping each one.
/// Blank paragraphs survive as empty lines (vertical space).
fn split_lines(text: &str, budget: usize) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    for paragraph in normalized.split('\n') {
        let wrapped = wrap(paragraph, budget);
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

/// Render a text block.
pub fn render_text(block: &TextBlock, ctx: &RenderContext) -> Result<Canvas, PaginitaError> {
    let text = block.text.trim();
    let size = block.font_size.unwrap_or(ctx.base_font_size).max(1);
    let padding = block.padding.unwrap_or(DEFAULT_PADDING);
    let align = block.align.unwrap_or_default();

    let fonts = ctx.fonts.resolve(size, block.bold, block.font.as_deref());
    let line_height = fonts.line_height();
    let lines = split_lines(text, max_chars(ctx.width, size, ctx.wrap_aspect));

    let height = line_height * lines.len() as u32 + 2 * padding;
    let mut canvas = Canvas::blank(ctx.width, height);

    let mut y = padding as i32;
    for line in &lines {
        if line.trim().is_empty() {
            y += line_height as i32;
            continue;
        }
        let measured = fonts.measure(line) as i32;
        let x = match align {
            Align::Left => TEXT_MARGIN,
            Align::Center => ((ctx.width as i32 - measured) / 2).max(0),
            Align::Right => (ctx.width as i32 - measured - TEXT_MARGIN).max(0),
        };
        fonts.draw(&mut canvas, x, y, line);
        y += line_height as i32;
    }

    Ok(canvas)
}

/// Render a title block: text with bold forced, a larger default size,
/// centered default alignment and wider padding. A parameter override, not
/// a separate algorithm.
pub fn render_title(block: &TextBlock, ctx: &RenderContext) -> Result<Canvas, PaginitaError> {
    let merged = TextBlock {
        text: block.text.clone(),
        font_size: Some(
            block
                .font_size
                .unwrap_or(ctx.base_font_size + TITLE_SIZE_BUMP),
        ),
        bold: true,
        align: Some(block.align.unwrap_or(Align::Center)),
        padding: Some(TITLE_PADDING),
        font: block.font.clone(),
    };
    render_text(&merged, ctx)
}

/// Render a bulleted list. Each item wraps independently against a width
/// reduced by the bullet indent; the bullet hangs at the left margin while
/// every wrapped line is indented by one font-size unit.
pub fn render_list(block: &ListBlock, ctx: &RenderContext) -> Result<Canvas, PaginitaError> {
    let size = block.font_size.unwrap_or(ctx.base_font_size).max(1);
    let fonts = ctx.fonts.resolve(size, block.bold, block.font.as_deref());
    let line_height = fonts.line_height();
    let budget = max_chars(
        ctx.width.saturating_sub(LIST_INDENT_RESERVE),
        size,
        ctx.wrap_aspect,
    );

    // (line, starts_item) pairs in draw order
    let mut rows: Vec<(String, bool)> = Vec::new();
    for item in &block.items {
        let wrapped = wrap(item.trim(), budget);
        if wrapped.is_empty() {
            rows.push((String::new(), true));
            continue;
        }
        let mut wrapped = wrapped.into_iter();
        if let Some(first) = wrapped.next() {
            rows.push((first, true));
        }
        rows.extend(wrapped.map(|cont| (cont, false)));
    }

    let height = line_height * rows.len() as u32 + 2 * DEFAULT_PADDING;
    let mut canvas = Canvas::blank(ctx.width, height);

    let indent = TEXT_MARGIN + size as i32;
    let mut y = DEFAULT_PADDING as i32;
    for (line, starts_item) in &rows {
        if *starts_item {
            fonts.draw(&mut canvas, TEXT_MARGIN, y, &block.bullet);
        }
        fonts.draw(&mut canvas, indent, y, line);
        y += line_height as i32;
    }

    Ok(canvas)
}

/// Render a separator: a fixed-height strip with a rule, dots, or nothing.
pub fn render_separator(
    block: &SeparatorBlock,
    ctx: &RenderContext,
) -> Result<Canvas, PaginitaError> {
    let mut canvas = Canvas::blank(ctx.width, SEPARATOR_HEIGHT);
    let y = (SEPARATOR_HEIGHT / 2) as i32;
    let right = ctx.width as i32 - SEPARATOR_MARGIN;

    match block.style.as_deref() {
        Some("blank") => {}
        Some("dotted") => {
            for x in (SEPARATOR_MARGIN..right).step_by(DOT_SPACING) {
                canvas.put(x, y, 0);
            }
        }
        // "line" and anything unrecognized draw the half-tone rule
        _ => canvas.hline(y, SEPARATOR_MARGIN, right, SEPARATOR_SHADE),
    }

    Ok(canvas)
}

// ============================================================================
// TESTS
// ============================================================================
