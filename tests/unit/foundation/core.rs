use super::*;

#[test]
fn canvas_rejects_degenerate_sizes() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert_eq!(
        Canvas::new(64, 32).unwrap(),
        Canvas {
            width: 64,
            height: 32
        }
    );
}

#[test]
fn canvas_rect_spans_pixels() {
    let r = Canvas::default().rect();
    assert_eq!(r, Rect::new(0.0, 0.0, 640.0, 480.0));
}

#[test]
fn step_index_displays_as_number() {
    assert_eq!(StepIndex(7).to_string(), "7");
    assert!(StepIndex(1) < StepIndex(2));
}
