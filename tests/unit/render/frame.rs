use super::*;
use crate::config::ColorConfig;
use crate::foundation::core::Canvas;
use crate::model::ModelKind;
use std::collections::BTreeMap;

fn si_policy() -> ColorPolicy {
    let statuses: BTreeMap<String, StateValue> = [
        ("Susceptible".to_owned(), StateValue::Int(0)),
        ("Infected".to_owned(), StateValue::Int(1)),
    ]
    .into_iter()
    .collect();
    ColorPolicy::for_model(ModelKind::Categorical, &statuses, &ColorConfig::default()).unwrap()
}

fn small_style() -> RenderStyle {
    RenderStyle {
        canvas: Canvas::new(320, 240).unwrap(),
        ..RenderStyle::default()
    }
}

fn renderer(dir: &Path, baseline: Option<&StateValue>) -> FrameRenderer {
    let g = Arc::new(Graph::ring(5));
    let layout = Layout::force_directed(&g);
    FrameRenderer::new(
        g,
        &layout,
        si_policy(),
        small_style(),
        baseline,
        TextRasterizer::empty(),
        dir,
    )
    .unwrap()
}

#[test]
fn render_writes_numbered_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut r = renderer(dir.path(), Some(&StateValue::Int(0)));

    let p0 = r.render(StepIndex(0), &Snapshot::new(0, [("0", 1i64)])).unwrap();
    let p1 = r.render(StepIndex(1), &Snapshot::new(1, [("2", 1i64)])).unwrap();
    assert_eq!(p0.file_name().unwrap(), "t_00000.png");
    assert_eq!(p1.file_name().unwrap(), "t_00001.png");

    let img = image::open(&p1).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (320, 240));
    assert_eq!(r.tracker().updates(), 2);
}

#[test]
fn node_pixels_take_the_state_color() {
    let dir = tempfile::tempdir().unwrap();
    let mut r = renderer(dir.path(), Some(&StateValue::Int(0)));
    let frame = r
        .draw(StepIndex(0), &Snapshot::new(0, [("0", 1i64)]))
        .unwrap();

    let at = |i: usize| {
        let p = r.node_positions()[i];
        frame
            .pixel(p.x.round() as u32, p.y.round() as u32)
            .unwrap()
    };
    let [r0, _, b0, _] = at(0);
    assert!(r0 > b0, "node 0 should be red");
    let [r1, _, b1, _] = at(1);
    assert!(b1 > r1, "node 1 should be blue");
}

#[test]
fn baseline_must_be_colourable() {
    let dir = tempfile::tempdir().unwrap();
    let g = Arc::new(Graph::ring(3));
    let layout = Layout::force_directed(&g);
    let err = FrameRenderer::new(
        g,
        &layout,
        si_policy(),
        small_style(),
        Some(&StateValue::Int(9)),
        TextRasterizer::empty(),
        dir.path(),
    )
    .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn strict_mode_rejects_unreported_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let mut r = renderer(dir.path(), None);
    let err = r
        .render(StepIndex(0), &Snapshot::new(0, [("0", 1i64)]))
        .unwrap_err();
    assert!(err.is_config());
    assert!(!r.frame_path(StepIndex(0)).exists());
}

#[test]
fn write_png_into_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 255],
        premultiplied: false,
    };
    let err = write_png(&dir.path().join("nope").join("x.png"), &frame).unwrap_err();
    assert!(!err.is_config());
}
