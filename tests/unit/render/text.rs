use super::*;
use crate::foundation::color::Rgba8;
use crate::foundation::core::Point;

fn label(text: &str) -> TextOp {
    TextOp {
        pos: Point::new(10.0, 10.0),
        text: text.to_owned(),
        size_px: 12.0,
        anchor: TextAnchor::Start,
        color: Rgba8::rgb(0, 0, 0),
    }
}

#[test]
fn overlay_escapes_markup() {
    let svg = overlay_svg(Canvas::default(), &[label("S<I>&R \"x\"")]);
    assert!(svg.contains("S&lt;I&gt;&amp;R &quot;x&quot;"));
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn overlay_parses_as_svg() {
    let svg = overlay_svg(Canvas::default(), &[label("Infected"), label("t=0")]);
    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 640.0);
}

#[test]
fn nothing_to_draw_yields_none() {
    let r = TextRasterizer::empty();
    assert!(r.rasterize(Canvas::default(), &[]).unwrap().is_none());
    assert!(r.rasterize(Canvas::default(), &[label("x")]).unwrap().is_none());
}

fn inked(px: &[u8]) -> usize {
    px.chunks_exact(4).filter(|p| p[3] > 0).count()
}

#[test]
fn system_fonts_ink_the_overlay_when_available() {
    let r = TextRasterizer::system();
    let canvas = Canvas::new(64, 32).unwrap();
    match r.rasterize(canvas, &[label("Hi")]).unwrap() {
        Some(px) => {
            assert_eq!(px.len(), 64 * 32 * 4);
            assert!(inked(&px) > 0, "{} faces loaded but nothing drawn", r.face_count());
        }
        None => assert_eq!(r.face_count(), 0),
    }
}

#[test]
fn unknown_family_falls_back_to_a_loaded_face() {
    let r = TextRasterizer::system();
    if r.face_count() == 0 {
        return;
    }
    let svg = overlay_svg(Canvas::new(64, 32).unwrap(), &[label("Hi")])
        .replace("sans-serif", "No Such Family");
    let opts = usvg::Options {
        fontdb: r.fontdb.clone(),
        font_resolver: font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).unwrap();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(64, 32).unwrap();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    assert!(inked(pixmap.data()) > 0);
}
