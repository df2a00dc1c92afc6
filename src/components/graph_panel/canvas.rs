//! Canvas-2D render back-end.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::engine::{FrameSink, FrameSnapshot};

pub const NODE_BG_COLOR: &str = "#9dc9fe";
pub const NODE_BORDER_COLOR: &str = "#2186ee";

/// Labels clutter the view past this node count, so they are only drawn
/// for small runs.
const MAX_LABELED_NODES: usize = 50;

/// Immediate-mode back-end: redraws the whole frame into a 2D canvas
/// context every time a snapshot is submitted.
pub struct CanvasBackend {
	ctx: CanvasRenderingContext2d,
}

impl CanvasBackend {
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl FrameSink for CanvasBackend {
	fn submit_frame(&mut self, frame: &FrameSnapshot<'_>) {
		let ctx = &self.ctx;
		let k = frame.camera.k;

		ctx.set_fill_style_str("#ffffff");
		ctx.fill_rect(0.0, 0.0, frame.width, frame.height);
		ctx.save();
		let _ = ctx.translate(frame.camera.x, frame.camera.y);
		let _ = ctx.scale(k, k);

		ctx.set_stroke_style_str(NODE_BORDER_COLOR);
		ctx.set_line_width(1.0 / k);
		for edge in frame.edges {
			let (x1, y1) = frame.nodes[edge.source].pos();
			let (x2, y2) = frame.nodes[edge.target].pos();
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
			ctx.stroke();
		}

		let labeled = frame.meta.len() <= MAX_LABELED_NODES;
		for (node, meta) in frame.nodes.iter().zip(frame.meta.iter()) {
			let (x, y) = node.pos();
			ctx.begin_path();
			let _ = ctx.arc(x, y, meta.radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(NODE_BG_COLOR);
			ctx.fill();
			ctx.set_stroke_style_str(NODE_BORDER_COLOR);
			ctx.set_line_width(1.0 / k);
			ctx.stroke();

			if labeled {
				ctx.set_fill_style_str("#333333");
				ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
				let _ = ctx.fill_text(&meta.label, x + meta.radius + 3.0, y + 3.0);
			}
		}

		ctx.restore();
	}
}
