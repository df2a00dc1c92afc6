//! Engine facade: owns the graph, simulation state, stabilizer, viewport
//! and event queue for one run, and guards against stale-run races.

use log::debug;
use rand::Rng;

use super::forces::{ForceConfig, ForceField};
use super::graph::{self, Edge, Node};
use super::settings::{EngineError, Settings};
use super::sim::{SimNode, SimulationState};
use super::stabilize::{EngineEvent, EventKind, Phase, Stabilizer, StabilizerConfig};
use super::viewport::{Camera, Viewport};

/// World-space pick radius for drag gestures, larger than the draw radius
/// so nodes are comfortable to grab.
pub const HIT_RADIUS: f64 = 12.0;

/// Borrowed view of everything a render back-end needs for one frame.
pub struct FrameSnapshot<'a> {
	/// Kinematic state, indexed by node id.
	pub nodes: &'a [SimNode],
	/// Labels and radii, indexed by node id.
	pub meta: &'a [Node],
	/// Edges, drawn between the endpoint positions in `nodes`.
	pub edges: &'a [Edge],
	/// Camera transform to apply to all primitives.
	pub camera: Camera,
	/// Surface width in pixels.
	pub width: f64,
	/// Surface height in pixels.
	pub height: f64,
}

/// Capability interface the render back-ends implement. The engine hands a
/// [`FrameSnapshot`] across this seam and knows nothing about the surface
/// on the other side.
pub trait FrameSink {
	/// Present one frame. Called once per animation frame with a fully
	/// consistent snapshot; partial-tick states are never observable.
	fn submit_frame(&mut self, frame: &FrameSnapshot<'_>);
}

/// One run of the benchmark: a generated graph, its simulation and camera,
/// plus the queue of timestamped lifecycle records the host drains.
pub struct GraphEngine {
	settings: Settings,
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	state: SimulationState,
	field: ForceField,
	stabilizer: Stabilizer,
	viewport: Viewport,
	width: f64,
	height: f64,
	run_id: u64,
	events: Vec<EngineEvent>,
}

impl GraphEngine {
	/// Generate a graph for `settings`, scatter it over a `width` x `height`
	/// viewport and start stabilizing. Records the first `StabilizeStart`
	/// at `now`.
	pub fn new<R: Rng>(settings: Settings, rng: &mut R, width: f64, height: f64, now: f64) -> Self {
		let (nodes, edges) = graph::generate(rng, settings.num_nodes, settings.num_links);
		let state = SimulationState::scattered(&nodes, rng, width, height);
		let field = ForceField::new(ForceConfig {
			center: (width / 2.0, height / 2.0),
			..ForceConfig::default()
		});
		let mut stabilizer = Stabilizer::new(StabilizerConfig::default());
		let mut events = Vec::new();
		let run_id = 1;
		stabilizer.start(now, run_id, &mut events);
		Self {
			settings,
			nodes,
			edges,
			state,
			field,
			stabilizer,
			viewport: Viewport::default(),
			width,
			height,
			run_id,
			events,
		}
	}

	/// Discard the current run and start a fresh one in place. Any episode
	/// still running is dropped without ever emitting its `StabilizeEnd`,
	/// as are undrained event records; the camera is kept as-is.
	pub fn regenerate<R: Rng>(&mut self, settings: Settings, rng: &mut R, now: f64) {
		if self.stabilizer.phase() == Phase::Running {
			debug!(
				"dropping stale stabilization episode for run {}",
				self.run_id
			);
		}
		if !self.events.is_empty() {
			debug!(
				"discarding {} undrained event(s) from run {}",
				self.events.len(),
				self.run_id
			);
			self.events.clear();
		}
		self.run_id += 1;
		self.settings = settings;
		let (nodes, edges) = graph::generate(rng, settings.num_nodes, settings.num_links);
		self.state = SimulationState::scattered(&nodes, rng, self.width, self.height);
		self.nodes = nodes;
		self.edges = edges;
		self.stabilizer = Stabilizer::new(StabilizerConfig::default());
		self.stabilizer.start(now, self.run_id, &mut self.events);
	}

	/// Advance the simulation by one tick if an episode is running.
	pub fn tick(&mut self, now: f64) {
		self.stabilizer.tick(
			&self.field,
			&mut self.state,
			&self.edges,
			now,
			self.run_id,
			&mut self.events,
		);
	}

	/// Record the start of one render pass.
	pub fn begin_draw(&mut self, now: f64) {
		self.events.push(EngineEvent {
			kind: EventKind::DrawStart,
			timestamp: now,
			run_id: self.run_id,
		});
	}

	/// Record the end of one render pass.
	pub fn end_draw(&mut self, now: f64) {
		self.events.push(EngineEvent {
			kind: EventKind::DrawEnd,
			timestamp: now,
			run_id: self.run_id,
		});
	}

	/// Hand the queued lifecycle records to the host, in emission order.
	pub fn drain_events(&mut self) -> Vec<EngineEvent> {
		std::mem::take(&mut self.events)
	}

	/// Pin `id` to a world-space position and keep the simulation hot. If
	/// the stabilizer had already settled this opens a fresh episode.
	pub fn drag_start(&mut self, id: usize, pos: (f64, f64), now: f64) -> Result<(), EngineError> {
		let node = self.sim_node_mut(id)?;
		node.pin = Some(pos);
		self.stabilizer.reheat(now, self.run_id, &mut self.events);
		Ok(())
	}

	/// Move the pin of an actively dragged node.
	pub fn drag_move(&mut self, id: usize, pos: (f64, f64)) -> Result<(), EngineError> {
		self.sim_node_mut(id)?.pin = Some(pos);
		Ok(())
	}

	/// Release a dragged node: it keeps its pinned position, starts at
	/// rest, and rejoins free integration on the next tick.
	pub fn drag_end(&mut self, id: usize) -> Result<(), EngineError> {
		let node = self.sim_node_mut(id)?;
		if let Some((px, py)) = node.pin.take() {
			node.x = px;
			node.y = py;
		}
		node.vx = 0.0;
		node.vy = 0.0;
		Ok(())
	}

	/// Camera-aware hit test; returns the last matching node id, if any.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.viewport.screen_to_world(sx, sy);
		let mut found = None;
		for node in &self.state.nodes {
			let (x, y) = node.pos();
			let (dx, dy) = (x - wx, y - wy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.id);
			}
		}
		found
	}

	/// Borrow everything a [`FrameSink`] needs to draw the current frame.
	pub fn frame(&self) -> FrameSnapshot<'_> {
		FrameSnapshot {
			nodes: &self.state.nodes,
			meta: &self.nodes,
			edges: &self.edges,
			camera: self.viewport.camera(),
			width: self.width,
			height: self.height,
		}
	}

	pub fn viewport_mut(&mut self) -> &mut Viewport {
		&mut self.viewport
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn settings(&self) -> Settings {
		self.settings
	}

	pub fn phase(&self) -> Phase {
		self.stabilizer.phase()
	}

	pub fn run_id(&self) -> u64 {
		self.run_id
	}

	fn sim_node_mut(&mut self, id: usize) -> Result<&mut SimNode, EngineError> {
		self.state
			.nodes
			.get_mut(id)
			.ok_or(EngineError::UnknownNode(id))
	}
}
