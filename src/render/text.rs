use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::render::plan::{TextAnchor, TextOp};

/// Distance from the vertical centre of a line to its baseline, in ems.
const BASELINE_SHIFT_EM: f64 = 0.35;

/// Rasterizes frame text through an SVG overlay.
///
/// The font database is loaded once and shared between clones. Without any usable font the
/// overlay is simply empty.
#[derive(Clone)]
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.fontdb.faces().count())
            .finish()
    }
}

impl TextRasterizer {
    /// Rasterizer backed by the system fonts.
    pub fn system() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.faces().count(), "loaded system fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Rasterizer without fonts; text is never drawn.
    pub fn empty() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Number of available font faces.
    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }

    /// Render `texts` into a premultiplied RGBA8 overlay of `canvas` size.
    ///
    /// Returns `None` when there is nothing to draw.
    pub fn rasterize(&self, canvas: Canvas, texts: &[TextOp]) -> Diff2GifResult<Option<Vec<u8>>> {
        if texts.is_empty() || self.face_count() == 0 {
            return Ok(None);
        }

        let svg = overlay_svg(canvas, texts);
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse text overlay svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| Diff2GifError::resource("failed to allocate text overlay pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(Some(pixmap.take()))
    }
}

/// Resolve the requested family, then the generic families, then any loaded face.
///
/// fontdb maps `sans-serif` to "Arial" whether or not that family is installed.
fn font_resolver() -> usvg::FontResolver<'static> {
    use usvg::fontdb::Family;

    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => Family::Serif,
                    usvg::FontFamily::SansSerif => Family::SansSerif,
                    usvg::FontFamily::Cursive => Family::Cursive,
                    usvg::FontFamily::Fantasy => Family::Fantasy,
                    usvg::FontFamily::Monospace => Family::Monospace,
                    usvg::FontFamily::Named(s) => Family::Name(s),
                })
                .collect::<Vec<_>>();
            families.extend([Family::SansSerif, Family::Serif, Family::Monospace]);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

pub(crate) fn overlay_svg(canvas: Canvas, texts: &[TextOp]) -> String {
    let mut s = String::with_capacity(256 + texts.len() * 128);
    let _ = write!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    for t in texts {
        let anchor = match t.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let opacity = f64::from(t.color.a) / 255.0;
        let _ = write!(
            s,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size:.2}" text-anchor="{anchor}" fill="{fill}" fill-opacity="{opacity:.3}">{body}</text>"#,
            x = t.pos.x,
            y = t.pos.y + t.size_px * BASELINE_SHIFT_EM,
            size = t.size_px,
            fill = crate::foundation::color::Rgba8 { a: 255, ..t.color }.to_hex(),
            body = escape_xml(&t.text),
        );
    }
    s.push_str("</svg>");
    s
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
