//! SVG render back-end.

use svg::Document;
use svg::node::element::{Circle, Group, Line};
use web_sys::Element;

use crate::engine::{FrameSink, FrameSnapshot};

use super::canvas::{NODE_BG_COLOR, NODE_BORDER_COLOR};

/// Retained-markup back-end: composes the frame as an `<svg>` document with
/// one camera-transformed group and swaps it into the host element.
pub struct SvgBackend {
	host: Element,
}

impl SvgBackend {
	pub fn new(host: Element) -> Self {
		Self { host }
	}
}

impl FrameSink for SvgBackend {
	fn submit_frame(&mut self, frame: &FrameSnapshot<'_>) {
		let camera = frame.camera;
		let mut group = Group::new().set(
			"transform",
			format!("translate({},{})scale({})", camera.x, camera.y, camera.k),
		);

		for edge in frame.edges {
			let (x1, y1) = frame.nodes[edge.source].pos();
			let (x2, y2) = frame.nodes[edge.target].pos();
			group = group.add(
				Line::new()
					.set("x1", x1)
					.set("y1", y1)
					.set("x2", x2)
					.set("y2", y2)
					.set("stroke", NODE_BORDER_COLOR),
			);
		}

		for (node, meta) in frame.nodes.iter().zip(frame.meta.iter()) {
			let (x, y) = node.pos();
			group = group.add(
				Circle::new()
					.set("cx", x)
					.set("cy", y)
					.set("r", meta.radius)
					.set("fill", NODE_BG_COLOR)
					.set("stroke", NODE_BORDER_COLOR)
					.set("stroke-width", 1),
			);
		}

		let document = Document::new()
			.set("width", frame.width)
			.set("height", frame.height)
			.add(group);
		self.host.set_inner_html(&document.to_string());
	}
}
