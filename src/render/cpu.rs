use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::foundation::color::Rgba8;
use crate::foundation::core::Point;
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::render::FrameRGBA;
use crate::render::plan::{DrawOp, FramePlan};

const CIRCLE_TOLERANCE: f64 = 0.05;

/// Rasterize a plan with `vello_cpu`, then blend the optional premultiplied text overlay on top.
///
/// The render context lives only for the duration of the call.
pub fn paint_plan(plan: &FramePlan, overlay: Option<&[u8]>) -> Diff2GifResult<FrameRGBA> {
    let (width, height) = (plan.canvas.width, plan.canvas.height);
    let w: u16 = width
        .try_into()
        .map_err(|_| Diff2GifError::config("frame width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| Diff2GifError::config("frame height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    ctx.set_paint(paint_color(plan.background));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));

    for op in &plan.ops {
        match op {
            DrawOp::Rect { rect, color } => {
                ctx.set_paint(paint_color(*color));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    rect.x0, rect.y0, rect.x1, rect.y1,
                ));
            }
            DrawOp::Segment {
                from,
                to,
                width,
                color,
            } => {
                let Some(quad) = segment_quad(*from, *to, *width) else {
                    continue;
                };
                ctx.set_paint(paint_color(*color));
                ctx.fill_path(&quad);
            }
            DrawOp::Disc {
                center,
                radius,
                color,
            } => {
                if *radius <= 0.0 {
                    continue;
                }
                let circle = vello_cpu::kurbo::Circle::new(cpu_point(*center), *radius)
                    .to_path(CIRCLE_TOLERANCE);
                ctx.set_paint(paint_color(*color));
                ctx.fill_path(&circle);
            }
        }
    }

    if let Some(bytes) = overlay {
        let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    }

    ctx.flush();
    let mut target = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut target);

    let mut data = target.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut data);
    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: false,
    })
}

fn paint_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

// A stroked segment as a filled quad, butt caps.
fn segment_quad(from: Point, to: Point, width: f64) -> Option<vello_cpu::kurbo::BezPath> {
    let d = to - from;
    let len = d.hypot();
    if len <= f64::EPSILON || width <= 0.0 {
        return None;
    }
    let n = kurbo::Vec2::new(-d.y / len, d.x / len) * (width / 2.0);

    let mut p = vello_cpu::kurbo::BezPath::new();
    p.move_to(cpu_point(from + n));
    p.line_to(cpu_point(to + n));
    p.line_to(cpu_point(to - n));
    p.line_to(cpu_point(from - n));
    p.close_path();
    Some(p)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> Diff2GifResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| Diff2GifError::config("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| Diff2GifError::config("pixmap height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(Diff2GifError::resource("overlay byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
