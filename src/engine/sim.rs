//! Mutable per-run kinematic state for the force simulation.

use rand::Rng;

use super::graph::Node;

/// Kinematic state for one node. `pin` overrides the simulated position
/// while a drag is active; a pinned node never integrates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimNode {
	/// Node id this state belongs to.
	pub id: usize,
	/// Simulated x position.
	pub x: f64,
	/// Simulated y position.
	pub y: f64,
	/// x velocity.
	pub vx: f64,
	/// y velocity.
	pub vy: f64,
	/// Collision radius.
	pub radius: f64,
	/// Drag pin; present only while the node is being dragged.
	pub pin: Option<(f64, f64)>,
}

impl SimNode {
	/// Position the node should be treated as occupying this tick.
	pub fn pos(&self) -> (f64, f64) {
		self.pin.unwrap_or((self.x, self.y))
	}
}

/// The full mutable simulation state for one run. Owned by the engine
/// facade; [`ForceField::step`](super::forces::ForceField::step) borrows it
/// mutably for exactly one tick at a time.
#[derive(Clone, Debug)]
pub struct SimulationState {
	/// One entry per node, indexed by node id (ids are dense).
	pub nodes: Vec<SimNode>,
	/// Global cooling scalar scaling every force this tick.
	pub alpha: f64,
	/// Set once the stabilizer reaches a terminal phase.
	pub converged: bool,
}

impl SimulationState {
	/// Scatter initial positions uniformly over the viewport rectangle.
	pub fn scattered<R: Rng>(nodes: &[Node], rng: &mut R, width: f64, height: f64) -> Self {
		let nodes = nodes
			.iter()
			.map(|node| SimNode {
				id: node.id,
				x: rng.random_range(0.0..width.max(1.0)),
				y: rng.random_range(0.0..height.max(1.0)),
				vx: 0.0,
				vy: 0.0,
				radius: node.radius,
				pin: None,
			})
			.collect();
		Self {
			nodes,
			alpha: 1.0,
			converged: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::graph;
	use super::*;

	#[test]
	fn scatter_stays_inside_the_viewport() {
		let mut rng = SmallRng::seed_from_u64(11);
		let (nodes, _) = graph::generate(&mut rng, 30, 0);
		let state = SimulationState::scattered(&nodes, &mut rng, 640.0, 480.0);
		assert_eq!(state.nodes.len(), 30);
		for node in &state.nodes {
			assert!((0.0..640.0).contains(&node.x));
			assert!((0.0..480.0).contains(&node.y));
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
			assert!(node.pin.is_none());
		}
	}

	#[test]
	fn pinned_position_overrides_simulated() {
		let node = SimNode {
			id: 0,
			x: 1.0,
			y: 2.0,
			vx: 0.0,
			vy: 0.0,
			radius: 5.0,
			pin: Some((10.0, 20.0)),
		};
		assert_eq!(node.pos(), (10.0, 20.0));
	}
}
