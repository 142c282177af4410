//! Rasterizes pages into RGB images and writes them to disk.
//!
//! Drawing follows each block's [`BlockLayout`]: the lines are the ones the
//! paginator measured and the cursor always advances by the layout height.

mod canvas;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use canvas::Canvas;
use embedded_graphics::{
    Drawable,
    mono_font::MonoTextStyle,
    pixelcolor::Rgb888,
    prelude::Point,
    text::{Baseline, Text},
};
use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::{
    Error,
    fonts::{Face, FontSet, builtin_advance, round_px},
    inline::SpanKind,
    layout::{BlockLayout, LayoutBody},
    measure::{Metrics, TextRole},
    paginate::Page,
    style::{Color, StyleConfig},
    wrap::Line,
};

/// Encoding of written page images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

fn coord(value: u32) -> i32 { i32::try_from(value).unwrap_or(i32::MAX) }

fn rgb888(color: Color) -> Rgb888 { Rgb888::new(color.0, color.1, color.2) }

/// Draw `text` with its top edge at `origin.1`.
fn draw_run(
    canvas: &mut Canvas,
    face: Face<'_>,
    origin: (i32, i32),
    text: &str,
    color: Color,
    bold: bool,
) {
    let (x, y) = origin;
    let mut pen = x;
    match face {
        Face::Outline { font, px } => {
            let ascent = font
                .horizontal_line_metrics(px)
                .map_or(px * 0.8, |line| line.ascent);
            let baseline = y.saturating_add(coord(round_px(ascent)));
            for ch in text.chars() {
                let (metrics, bitmap) = font.rasterize(ch, px);
                if metrics.width > 0 {
                    let glyph_height = i32::try_from(metrics.height).unwrap_or(0);
                    let left = pen.saturating_add(metrics.xmin);
                    let top = baseline - metrics.ymin - glyph_height;
                    for (row, coverage) in (0..).zip(bitmap.chunks(metrics.width)) {
                        for (col, alpha) in (0..).zip(coverage) {
                            canvas.blend(left + col, top + row, color, *alpha);
                        }
                    }
                }
                pen = pen.saturating_add(coord(face.advance(ch)));
            }
        }
        Face::Builtin(font) => {
            let style = MonoTextStyle::new(font, rgb888(color));
            let mut utf8 = [0u8; 4];
            for ch in text.chars() {
                let piece: &str = ch.encode_utf8(&mut utf8);
                let Ok(_) =
                    Text::with_baseline(piece, Point::new(pen, y), style, Baseline::Top)
                        .draw(canvas);
                if bold {
                    let Ok(_) = Text::with_baseline(
                        piece,
                        Point::new(pen + 1, y),
                        style,
                        Baseline::Top,
                    )
                    .draw(canvas);
                }
                pen = pen.saturating_add(coord(builtin_advance(font, ch)));
            }
        }
    }
}

struct PageRenderer<'a> {
    canvas: Canvas,
    fonts: &'a FontSet,
    style: &'a StyleConfig,
}

impl PageRenderer<'_> {
    fn span_color(&self, role: TextRole, kind: SpanKind) -> Color {
        let palette = &self.style.palette;
        match (role, kind) {
            (TextRole::Heading(_), _) => palette.title,
            (_, SpanKind::Code) => palette.code_span_text,
            (_, SpanKind::Highlight) => palette.highlight_text,
            _ => palette.text,
        }
    }

    fn draw_line(&mut self, line: &Line, x: i32, y: i32, role: TextRole) {
        let pad = coord(self.style.spacing.span_padding);
        let mut pen = x;
        for span in line.spans() {
            let face = self.fonts.face(role, span.kind);
            let width = coord(self.fonts.text_width(&span.text, role, span.kind));
            if role == TextRole::Body && span.kind.has_background() {
                let background = if span.kind == SpanKind::Code {
                    self.style.palette.code_bg
                } else {
                    self.style.palette.highlight_bg
                };
                let bottom = y + coord(self.fonts.line_height(role, span.kind)) + 4;
                self.canvas
                    .fill_rect(pen - pad, y - 2, pen + width + pad, bottom, background);
            }
            let color = self.span_color(role, span.kind);
            draw_run(
                &mut self.canvas,
                face,
                (pen, y),
                &span.text,
                color,
                face.fake_bold(span.kind),
            );
            pen = pen.saturating_add(width);
        }
    }

    fn draw_lines(
        &mut self,
        lines: &[Line],
        x: i32,
        mut y: i32,
        role: TextRole,
        spacing: u32,
    ) -> i32 {
        for line in lines {
            self.draw_line(line, x, y, role);
            y += coord(spacing);
        }
        y
    }

    fn draw_block(&mut self, layout: &BlockLayout, x: i32, y: i32) {
        let style = self.style;
        let (spacing, palette) = (&style.spacing, &style.palette);
        let width = coord(style.content_width());
        match &layout.body {
            LayoutBody::Heading { level, lines } => {
                let line_height = spacing.heading_line(*level);
                self.draw_lines(lines, x, y, TextRole::Heading(*level), line_height);
            }
            LayoutBody::Paragraph { lines } => {
                let line_height = spacing.body_line;
                self.draw_lines(lines, x, y, TextRole::Body, line_height);
            }
            LayoutBody::Code { lines } => {
                let rows = u32::try_from(lines.len()).unwrap_or(u32::MAX);
                let box_height = coord(
                    rows.saturating_mul(spacing.code_line)
                        .saturating_add(spacing.code_padding),
                );
                let (code_bg, border, ink) =
                    (palette.code_bg, palette.border, palette.code_block_text);
                let (inset, top, line_height) = (
                    coord(spacing.code_inset),
                    coord(spacing.code_padding / 2),
                    coord(spacing.code_line),
                );
                self.canvas
                    .fill_rect(x, y, x + width, y + box_height, code_bg);
                self.canvas
                    .stroke_rect(x, y, x + width, y + box_height, border);
                let face = self.fonts.face(TextRole::Code, SpanKind::Normal);
                let mut row_y = y + top;
                for line in lines {
                    draw_run(&mut self.canvas, face, (x + inset, row_y), line, ink, false);
                    row_y += line_height;
                }
            }
            LayoutBody::Quote { lines } => {
                let rows = u32::try_from(lines.len()).unwrap_or(u32::MAX);
                let bar_height = coord(
                    rows.saturating_mul(spacing.body_line)
                        .saturating_add(spacing.quote_padding),
                );
                let (bar, bar_width) = (palette.quote_bar, coord(spacing.quote_bar_width));
                let (offset, top, line_height) = (
                    coord(spacing.quote_text_offset),
                    coord(spacing.quote_padding / 2),
                    spacing.body_line,
                );
                self.canvas
                    .fill_rect(x, y, x + bar_width, y + bar_height, bar);
                self.draw_lines(lines, x + offset, y + top, TextRole::Body, line_height);
            }
            LayoutBody::List { items } => {
                let (line_height, item_gap) = (spacing.body_line, coord(spacing.list_item_gap));
                let mut item_y = y;
                for lines in items {
                    item_y = self.draw_lines(lines, x, item_y, TextRole::Body, line_height);
                    item_y += item_gap;
                }
            }
            LayoutBody::Rule => {
                let thickness = coord(spacing.rule_thickness);
                let top = y + coord(spacing.rule_height / 2) - thickness / 2;
                let border = palette.border;
                self.canvas
                    .fill_rect(x, top, x + width, top + thickness, border);
            }
        }
    }
}

/// Draw every block of `page` onto a fresh page image.
#[must_use]
pub fn render_page(page: &Page, fonts: &FontSet, style: &StyleConfig) -> RgbImage {
    let mut renderer = PageRenderer {
        canvas: Canvas::new(style.page.width, style.page.height, style.palette.background),
        fonts,
        style,
    };
    let x = coord(style.page.margin_left);
    let mut y = coord(style.page.margin_top);
    for placed in page.items() {
        renderer.draw_block(&placed.layout, x, y);
        y = y.saturating_add(coord(placed.layout.height));
    }
    renderer.canvas.into_image()
}

/// Path of page `number` (1-based) in `dir`.
#[must_use]
pub fn page_path(dir: &Path, base: &str, number: usize, format: OutputFormat) -> PathBuf {
    dir.join(format!("{base}_{number:03}.{}", format.extension()))
}

/// Write `images` into `dir` as `{base}_001`, `{base}_002` and so on.
///
/// # Errors
/// Returns [`Error::CreateOutputDir`] if `dir` cannot be created and
/// [`Error::WriteImage`] for the first image that fails to encode or save.
pub fn write_pages(
    images: &[RgbImage],
    dir: &Path,
    base: &str,
    format: OutputFormat,
) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(dir).map_err(|source| Error::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    images
        .iter()
        .enumerate()
        .map(|(idx, image)| {
            let path = page_path(dir, base, idx + 1, format);
            image
                .save_with_format(&path, format.image_format())
                .map_err(|source| Error::WriteImage {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path.display(), "wrote page");
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::{blocks::Block, paginate::paginate};

    #[fixture]
    fn fonts() -> FontSet { FontSet::builtin() }

    fn single_page(blocks: Vec<Block>, fonts: &FontSet, style: &StyleConfig) -> Page {
        let mut pages = paginate(blocks, fonts, style);
        assert_eq!(pages.len(), 1);
        pages.remove(0)
    }

    fn region_has(image: &RgbImage, xs: Range<u32>, ys: Range<u32>, pixel: [u8; 3]) -> bool {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .any(|(x, y)| image.get_pixel(x, y).0 == pixel)
    }

    #[rstest]
    fn page_has_configured_size_and_background(fonts: FontSet) {
        let style = StyleConfig::default();
        let page = single_page(vec![Block::Rule], &fonts, &style);
        let image = render_page(&page, &fonts, &style);
        assert_eq!(image.dimensions(), (900, 1600));
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(899, 1599).0, [255, 255, 255]);
    }

    #[rstest]
    fn heading_text_is_inked(fonts: FontSet) {
        let style = StyleConfig::default();
        let page = single_page(
            vec![Block::Heading {
                level: 1,
                content: "Title".into(),
            }],
            &fonts,
            &style,
        );
        let image = render_page(&page, &fonts, &style);
        assert!(region_has(&image, 50..110, 50..70, [0, 0, 0]));
        assert!(!region_has(&image, 0..900, 200..1600, [0, 0, 0]));
    }

    #[rstest]
    fn code_block_draws_box_and_border(fonts: FontSet) {
        let style = StyleConfig::default();
        let page = single_page(
            vec![Block::Code {
                language: None,
                content: "let x = 1;".into(),
            }],
            &fonts,
            &style,
        );
        let image = render_page(&page, &fonts, &style);
        assert_eq!(image.get_pixel(50, 50).0, [220, 220, 220]);
        assert_eq!(image.get_pixel(55, 55).0, [240, 240, 240]);
        // Box is one code line plus padding tall.
        assert_eq!(image.get_pixel(55, 50 + 80 + 2).0, [255, 255, 255]);
        assert!(region_has(&image, 65..165, 65..85, [80, 80, 80]));
    }

    #[rstest]
    fn quote_bar_and_rule_use_palette(fonts: FontSet) {
        let style = StyleConfig::default();
        let page = single_page(
            vec![
                Block::Quote {
                    content: "quoted".into(),
                },
                Block::Rule,
            ],
            &fonts,
            &style,
        );
        let image = render_page(&page, &fonts, &style);
        assert_eq!(image.get_pixel(52, 60).0, [150, 150, 150]);
        // Quote takes 64 + 20 + 20, the rule line sits 20px into its slot.
        assert_eq!(image.get_pixel(400, 50 + 104 + 20).0, [220, 220, 220]);
    }

    #[rstest]
    fn inline_code_gets_a_background(fonts: FontSet) {
        let style = StyleConfig::default();
        let page = single_page(
            vec![Block::Paragraph {
                content: "run `cargo` now".into(),
            }],
            &fonts,
            &style,
        );
        let image = render_page(&page, &fonts, &style);
        // "run " is four 10px cells, so the code span starts at x = 90.
        assert_eq!(image.get_pixel(88, 49).0, [240, 240, 240]);
        assert!(region_has(&image, 90..140, 50..70, [200, 50, 80]));
    }

    #[rstest]
    #[case(OutputFormat::Png, "doc_001.png")]
    #[case(OutputFormat::Jpeg, "doc_001.jpg")]
    fn pages_are_numbered_from_one(#[case] format: OutputFormat, #[case] first: &str) {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("nested");
        let images = vec![RgbImage::new(4, 4), RgbImage::new(4, 4)];
        let paths = write_pages(&images, &out, "doc", format).expect("write pages");
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], out.join(first));
        assert!(paths.iter().all(|path| path.is_file()));
        assert!(paths[1].ends_with(first.replace("001", "002")));
    }
}
