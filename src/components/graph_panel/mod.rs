//! Benchmark graph panel.
//!
//! Hosts one [`GraphEngine`](crate::engine::GraphEngine) run behind a
//! pannable/zoomable surface with per-node dragging, and renders it through
//! one of two interchangeable back-ends:
//! - canvas: immediate-mode Canvas-2D drawing
//! - svg: retained `<svg>` markup, rebuilt per frame
//!
//! Both implement [`FrameSink`](crate::engine::FrameSink); the engine never
//! depends on either.

mod canvas;
mod component;
mod svg;

pub use component::GraphPanel;
