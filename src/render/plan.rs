use crate::color::{ColorPolicy, LegendEntry};
use crate::config::RenderStyle;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Point, Rect, StepIndex};
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::graph::Graph;
use crate::graph::layout::Layout;
use crate::model::status::StatusTracker;

/// Legend marker size in points (diameter).
const LEGEND_MARKER_PT: f64 = 10.0;
/// Rough advance of one glyph relative to the font size, used to size the legend panel.
const GLYPH_ADVANCE_EM: f64 = 0.6;
const MIN_PLOT_SHARE: f64 = 0.25;
const LABEL_COLOR: Rgba8 = Rgba8::rgb(0, 0, 0);
const LEGEND_BORDER: Rgba8 = Rgba8::rgb(0xcc, 0xcc, 0xcc);

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// `pos` is the left end of the text.
    Start,
    /// `pos` is the centre of the text.
    Middle,
}

/// One text run; `pos.y` is the vertical centre of the line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    /// Anchor point in pixels.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    pub size_px: f64,
    /// Anchoring of `pos`.
    pub anchor: TextAnchor,
    /// Fill colour.
    pub color: Rgba8,
}

/// Shape draw operation, executed in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Axis-aligned filled rectangle.
    Rect {
        /// Pixel rect.
        rect: Rect,
        /// Fill colour.
        color: Rgba8,
    },
    /// Straight line segment.
    Segment {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line width in pixels.
        width: f64,
        /// Line colour.
        color: Rgba8,
    },
    /// Filled disc.
    Disc {
        /// Centre.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Fill colour.
        color: Rgba8,
    },
}

/// Everything needed to rasterize one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Output size.
    pub canvas: Canvas,
    /// Background fill.
    pub background: Rgba8,
    /// Shapes, back to front.
    pub ops: Vec<DrawOp>,
    /// Text drawn above every shape.
    pub texts: Vec<TextOp>,
    /// Resolved node colours in graph order.
    pub node_colors: Vec<Rgba8>,
}

/// Legend panel placement.
#[derive(Clone, Debug, PartialEq)]
struct LegendGeometry {
    frame: Rect,
    rows: Vec<(Point, Point)>,
    marker_radius: f64,
}

/// Frame geometry that stays fixed for every step of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneGeometry {
    /// Node centres in pixels, graph order.
    pub positions: Vec<Point>,
    /// Area nodes are projected into.
    pub plot: Rect,
    title: Option<(Point, f64)>,
    legend: Option<LegendGeometry>,
}

impl SceneGeometry {
    /// Lay out title, legend and plot area, then project the layout into the plot area.
    pub fn new(
        graph: &Graph,
        layout: &Layout,
        legend: &[LegendEntry],
        style: &RenderStyle,
    ) -> Diff2GifResult<Self> {
        let canvas = style.canvas.rect();
        let font_px = style.pt_to_px(style.font_size);
        let margin = (canvas.width().min(canvas.height()) * 0.04).max(2.0)
            + style.node_radius_px();

        let title_h = if style.show_title { font_px * 2.4 } else { 0.0 };
        let title = style
            .show_title
            .then(|| (Point::new(canvas.center().x, title_h / 2.0), font_px * 1.2));

        let legend = if style.show_legend && !legend.is_empty() {
            Some(legend_geometry(canvas, legend, style, font_px, title_h))
        } else {
            None
        };
        // The legend gets its own column unless that would squeeze the plot below a quarter
        // of the canvas; then it is drawn over the plot's upper-right corner.
        let legend_w = legend
            .as_ref()
            .map(|l| l.frame.width() + font_px)
            .filter(|w| canvas.width() - 2.0 * margin - w >= canvas.width() * MIN_PLOT_SHARE)
            .unwrap_or(0.0);

        let x1 = (canvas.x1 - margin - legend_w).max(margin);
        let y1 = (canvas.y1 - margin).max(margin + title_h);
        let plot = Rect::new(margin, margin + title_h, x1, y1);
        let positions = layout.project(graph, plot)?;

        Ok(Self {
            positions,
            plot,
            title,
            legend,
        })
    }
}

fn legend_geometry(
    canvas: Rect,
    entries: &[LegendEntry],
    style: &RenderStyle,
    font_px: f64,
    top: f64,
) -> LegendGeometry {
    let marker_radius = style.pt_to_px(LEGEND_MARKER_PT) / 2.0;
    let pad = font_px * 0.6;
    let row_h = (font_px * 1.6).max(marker_radius * 2.4);
    let max_chars = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let w = pad * 3.0 + marker_radius * 2.0 + max_chars * font_px * GLYPH_ADVANCE_EM;
    let h = pad * 2.0 + row_h * entries.len() as f64;

    let x0 = (canvas.x1 - pad - w).max(canvas.x0);
    let y0 = top + pad;
    let frame = Rect::new(x0, y0, x0 + w, y0 + h);

    let rows = (0..entries.len())
        .map(|i| {
            let cy = y0 + pad + row_h * (i as f64 + 0.5);
            let marker = Point::new(x0 + pad + marker_radius, cy);
            let label = Point::new(marker.x + marker_radius + pad, cy);
            (marker, label)
        })
        .collect();

    LegendGeometry {
        frame,
        rows,
        marker_radius,
    }
}

/// Resolve every node's colour from the tracker and build the draw list for one step.
///
/// A node without a tracked state is a configuration error.
pub fn compile_frame(
    graph: &Graph,
    geometry: &SceneGeometry,
    policy: &ColorPolicy,
    style: &RenderStyle,
    step: StepIndex,
    statuses: &StatusTracker,
) -> Diff2GifResult<FramePlan> {
    let node_colors = graph
        .nodes()
        .iter()
        .map(|id| {
            let state = statuses.get(id).ok_or_else(|| {
                Diff2GifError::config(format!("node \"{id}\" has no status at t={step}"))
            })?;
            policy.color_for(state)
        })
        .collect::<Diff2GifResult<Vec<_>>>()?;

    let mut ops = Vec::with_capacity(graph.edge_count() + graph.node_count() + 8);
    let mut texts = Vec::new();

    let edge_color = policy.edge_color().with_opacity(style.alpha);
    let edge_w = style.pt_to_px(style.edge_width);
    if edge_w > 0.0 {
        for &(a, b) in graph.edge_indices() {
            if a == b {
                continue;
            }
            ops.push(DrawOp::Segment {
                from: geometry.positions[a],
                to: geometry.positions[b],
                width: edge_w,
                color: edge_color,
            });
        }
    }

    let radius = style.node_radius_px();
    for (i, &center) in geometry.positions.iter().enumerate() {
        ops.push(DrawOp::Disc {
            center,
            radius,
            color: node_colors[i].with_opacity(style.alpha),
        });
    }

    let font_px = style.pt_to_px(style.font_size);
    if style.with_labels {
        for (id, &pos) in graph.nodes().iter().zip(&geometry.positions) {
            texts.push(TextOp {
                pos,
                text: id.clone(),
                size_px: font_px,
                anchor: TextAnchor::Middle,
                color: LABEL_COLOR,
            });
        }
    }

    if let Some((pos, size_px)) = geometry.title {
        texts.push(TextOp {
            pos,
            text: format!("Network state at t={step}"),
            size_px,
            anchor: TextAnchor::Middle,
            color: LABEL_COLOR,
        });
    }

    if let Some(legend) = &geometry.legend {
        ops.push(DrawOp::Rect {
            rect: legend.frame,
            color: LEGEND_BORDER,
        });
        ops.push(DrawOp::Rect {
            rect: legend.frame.inset(-1.0),
            color: style.background,
        });
        for (entry, &(marker, label)) in policy.legend().iter().zip(&legend.rows) {
            ops.push(DrawOp::Disc {
                center: marker,
                radius: legend.marker_radius,
                color: entry.color.with_opacity(style.alpha),
            });
            texts.push(TextOp {
                pos: label,
                text: entry.label.clone(),
                size_px: font_px,
                anchor: TextAnchor::Start,
                color: LABEL_COLOR,
            });
        }
    }

    Ok(FramePlan {
        canvas: style.canvas,
        background: style.background,
        ops,
        texts,
        node_colors,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
