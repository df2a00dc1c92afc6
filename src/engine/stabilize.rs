//! Stabilization state machine: drives the force field tick by tick, cools
//! alpha toward its floor and records lifecycle events for the host.

use super::forces::ForceField;
use super::graph::Edge;
use super::sim::SimulationState;

/// Lifecycle of one stabilization episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// No episode has started yet.
	Idle,
	/// An episode is ticking.
	Running,
	/// Alpha fell below its floor.
	Stabilized,
	/// The tick cap was hit before alpha cooled off.
	IterationLimitReached,
}

impl Phase {
	pub fn is_terminal(self) -> bool {
		matches!(self, Phase::Stabilized | Phase::IterationLimitReached)
	}
}

/// The four phase boundaries the host instruments. Draw events bracket one
/// render pass; stabilize events bracket one episode of [`Phase::Running`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
	/// A render pass began.
	DrawStart,
	/// A render pass finished.
	DrawEnd,
	/// A stabilization episode began.
	StabilizeStart,
	/// A stabilization episode reached a terminal phase.
	StabilizeEnd,
}

/// One timestamped notification record. The engine appends these to an
/// ordered queue instead of calling into the host from the tick loop; the
/// host drains the queue and computes elapsed durations itself. `run_id`
/// lets stale records from a discarded run be told apart from live ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineEvent {
	/// Which phase boundary this records.
	pub kind: EventKind,
	/// Monotonic timestamp supplied by the host clock, in milliseconds.
	pub timestamp: f64,
	/// The run this record belongs to.
	pub run_id: u64,
}

/// Alpha schedule and iteration budget.
#[derive(Clone, Copy, Debug)]
pub struct StabilizerConfig {
	/// Alpha at the start of every episode.
	pub alpha_start: f64,
	/// Floor below which the simulation counts as stabilized.
	pub alpha_min: f64,
	/// Per-tick multiplicative decay: `alpha *= 1 - alpha_decay`.
	pub alpha_decay: f64,
	/// Level alpha is raised back to while a drag keeps the sim hot.
	pub reheat_alpha: f64,
	/// Tick cap per episode.
	pub max_ticks: u32,
}

impl Default for StabilizerConfig {
	fn default() -> Self {
		Self {
			alpha_start: 1.0,
			alpha_min: 0.001,
			// Roughly 300 ticks from 1.0 down to the floor.
			alpha_decay: 0.023,
			reheat_alpha: 0.3,
			max_ticks: 1000,
		}
	}
}

/// Drives a [`ForceField`] across discrete ticks and detects convergence.
#[derive(Clone, Debug)]
pub struct Stabilizer {
	config: StabilizerConfig,
	phase: Phase,
	alpha: f64,
	ticks: u32,
}

impl Stabilizer {
	pub fn new(config: StabilizerConfig) -> Self {
		Self {
			config,
			phase: Phase::Idle,
			alpha: config.alpha_start,
			ticks: 0,
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn ticks(&self) -> u32 {
		self.ticks
	}

	/// Begin a fresh episode: reset alpha and the tick counter, enter
	/// `Running` and record `StabilizeStart`.
	pub fn start(&mut self, now: f64, run_id: u64, events: &mut Vec<EngineEvent>) {
		self.phase = Phase::Running;
		self.alpha = self.config.alpha_start;
		self.ticks = 0;
		events.push(EngineEvent {
			kind: EventKind::StabilizeStart,
			timestamp: now,
			run_id,
		});
	}

	/// React to a drag starting. While already `Running` this only raises
	/// alpha back to the active level and announces nothing; from `Idle` or
	/// a terminal phase it opens a fresh episode with its own event pair.
	pub fn reheat(&mut self, now: f64, run_id: u64, events: &mut Vec<EngineEvent>) {
		if self.phase == Phase::Running {
			self.alpha = self.alpha.max(self.config.reheat_alpha);
		} else {
			self.start(now, run_id, events);
			self.alpha = self.config.reheat_alpha;
		}
	}

	/// Run one tick: decay alpha, step the force field with it, and close
	/// the episode with a single `StabilizeEnd` once alpha drops below the
	/// floor or the tick cap is reached. A no-op outside `Running`.
	pub fn tick(
		&mut self,
		field: &ForceField,
		state: &mut SimulationState,
		edges: &[Edge],
		now: f64,
		run_id: u64,
		events: &mut Vec<EngineEvent>,
	) {
		if self.phase != Phase::Running {
			return;
		}
		self.alpha *= 1.0 - self.config.alpha_decay;
		state.alpha = self.alpha;
		field.step(state, edges);
		self.ticks += 1;

		if self.alpha < self.config.alpha_min {
			self.phase = Phase::Stabilized;
		} else if self.ticks >= self.config.max_ticks {
			self.phase = Phase::IterationLimitReached;
		} else {
			return;
		}
		state.converged = true;
		events.push(EngineEvent {
			kind: EventKind::StabilizeEnd,
			timestamp: now,
			run_id,
		});
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::graph;
	use super::*;

	fn fixture(seed: u64) -> (SimulationState, Vec<Edge>, ForceField) {
		let mut rng = SmallRng::seed_from_u64(seed);
		let (nodes, edges) = graph::generate(&mut rng, 12, 10);
		let state = SimulationState::scattered(&nodes, &mut rng, 200.0, 200.0);
		(state, edges, ForceField::default())
	}

	fn run_to_terminal(
		stab: &mut Stabilizer,
		state: &mut SimulationState,
		edges: &[Edge],
		field: &ForceField,
		events: &mut Vec<EngineEvent>,
	) {
		let mut guard = 0;
		while stab.phase() == Phase::Running {
			stab.tick(field, state, edges, guard as f64, 1, events);
			guard += 1;
			assert!(guard < 5000, "stabilization never terminated");
		}
	}

	#[test]
	fn alpha_decays_monotonically_to_stabilized() {
		let (mut state, edges, field) = fixture(21);
		let mut stab = Stabilizer::new(StabilizerConfig::default());
		let mut events = Vec::new();
		stab.start(0.0, 1, &mut events);
		let mut prev = stab.alpha();
		while stab.phase() == Phase::Running {
			stab.tick(&field, &mut state, &edges, 0.0, 1, &mut events);
			assert!(stab.alpha() <= prev);
			prev = stab.alpha();
		}
		assert_eq!(stab.phase(), Phase::Stabilized);
		assert!(state.converged);
		assert!(stab.ticks() <= StabilizerConfig::default().max_ticks);
	}

	#[test]
	fn one_event_pair_per_episode() {
		let (mut state, edges, field) = fixture(22);
		let mut stab = Stabilizer::new(StabilizerConfig::default());
		let mut events = Vec::new();
		stab.start(0.0, 1, &mut events);
		run_to_terminal(&mut stab, &mut state, &edges, &field, &mut events);
		// Further ticks in a terminal phase must not emit anything.
		stab.tick(&field, &mut state, &edges, 99.0, 1, &mut events);
		let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
		assert_eq!(kinds, vec![EventKind::StabilizeStart, EventKind::StabilizeEnd]);
	}

	#[test]
	fn tick_cap_reaches_iteration_limit() {
		let (mut state, edges, field) = fixture(23);
		let mut stab = Stabilizer::new(StabilizerConfig {
			alpha_decay: 0.0,
			max_ticks: 50,
			..StabilizerConfig::default()
		});
		let mut events = Vec::new();
		stab.start(0.0, 1, &mut events);
		run_to_terminal(&mut stab, &mut state, &edges, &field, &mut events);
		assert_eq!(stab.phase(), Phase::IterationLimitReached);
		assert_eq!(stab.ticks(), 50);
		assert_eq!(events.last().unwrap().kind, EventKind::StabilizeEnd);
	}

	#[test]
	fn reheat_while_running_is_silent() {
		let (mut state, edges, field) = fixture(24);
		let mut stab = Stabilizer::new(StabilizerConfig::default());
		let mut events = Vec::new();
		stab.start(0.0, 1, &mut events);
		for _ in 0..100 {
			stab.tick(&field, &mut state, &edges, 0.0, 1, &mut events);
		}
		let before = events.len();
		let cooled = stab.alpha();
		stab.reheat(1.0, 1, &mut events);
		assert_eq!(events.len(), before);
		assert!(stab.alpha() >= cooled);
		assert_eq!(stab.phase(), Phase::Running);
	}

	#[test]
	fn reheat_from_terminal_opens_a_fresh_episode() {
		let (mut state, edges, field) = fixture(25);
		let mut stab = Stabilizer::new(StabilizerConfig::default());
		let mut events = Vec::new();
		stab.start(0.0, 1, &mut events);
		run_to_terminal(&mut stab, &mut state, &edges, &field, &mut events);
		stab.reheat(50.0, 1, &mut events);
		assert_eq!(stab.phase(), Phase::Running);
		run_to_terminal(&mut stab, &mut state, &edges, &field, &mut events);
		let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
		assert_eq!(
			kinds,
			vec![
				EventKind::StabilizeStart,
				EventKind::StabilizeEnd,
				EventKind::StabilizeStart,
				EventKind::StabilizeEnd,
			]
		);
	}
}
