//! Force composition and integration for one simulation tick.

use super::graph::Edge;
use super::sim::SimulationState;

/// Tuning constants for the four force contributions. Defaults follow the
/// d3-force panel this benchmark mirrors: centering gain 0.1, many-body
/// charge -50, link rest length 0 with strength 1, velocity decay 0.6.
#[derive(Clone, Copy, Debug)]
pub struct ForceConfig {
	/// Point every unpinned node is pulled toward (viewport center).
	pub center: (f64, f64),
	/// Centering gain per axis.
	pub center_strength: f64,
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
	/// Lower clamp on squared pair distance, bounds the repulsion force.
	pub min_distance2: f64,
	/// Spring rest length per edge.
	pub link_distance: f64,
	/// Spring constant per edge.
	pub link_strength: f64,
	/// Positional overlap-resolution passes per tick.
	pub collision_passes: usize,
	/// Fraction of velocity retained after each tick.
	pub velocity_decay: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			center: (0.0, 0.0),
			center_strength: 0.1,
			charge_strength: -50.0,
			min_distance2: 1.0,
			link_distance: 0.0,
			link_strength: 1.0,
			collision_passes: 2,
			velocity_decay: 0.6,
		}
	}
}

/// Stateless force integrator. Holds only configuration; all mutable state
/// is borrowed per tick through [`step`](Self::step), so nothing leaks
/// across ticks and a fixed input state always produces the same output.
#[derive(Clone, Debug, Default)]
pub struct ForceField {
	/// Force tuning in effect for every tick.
	pub config: ForceConfig,
}

impl ForceField {
	pub fn new(config: ForceConfig) -> Self {
		Self { config }
	}

	/// Advance the simulation by one Euler step. Centering, repulsion and
	/// spring forces are scaled by `state.alpha`; collision resolution is
	/// positional and unscaled so converged layouts keep nodes separated.
	/// Pinned nodes are fixed boundary conditions: they exert forces on
	/// their neighbors but never accumulate velocity or move.
	pub fn step(&self, state: &mut SimulationState, edges: &[Edge]) {
		let cfg = &self.config;
		let alpha = state.alpha;
		let n = state.nodes.len();
		let mut acc = vec![(0.0_f64, 0.0_f64); n];

		// Centering.
		for (node, a) in state.nodes.iter().zip(acc.iter_mut()) {
			if node.pin.is_some() {
				continue;
			}
			let (x, y) = node.pos();
			a.0 += (cfg.center.0 - x) * cfg.center_strength * alpha;
			a.1 += (cfg.center.1 - y) * cfg.center_strength * alpha;
		}

		// Exact pairwise many-body repulsion.
		// TODO: switch to a quadtree approximation above a few thousand nodes.
		for i in 0..n {
			for j in (i + 1)..n {
				let (xi, yi) = state.nodes[i].pos();
				let (xj, yj) = state.nodes[j].pos();
				let (dx, dy) = (xj - xi, yj - yi);
				let d2 = (dx * dx + dy * dy).max(cfg.min_distance2);
				let f = cfg.charge_strength * alpha / d2;
				if state.nodes[i].pin.is_none() {
					acc[i].0 += dx * f;
					acc[i].1 += dy * f;
				}
				if state.nodes[j].pin.is_none() {
					acc[j].0 -= dx * f;
					acc[j].1 -= dy * f;
				}
			}
		}

		// Spring attraction along edges.
		for edge in edges {
			if edge.source == edge.target {
				continue;
			}
			let (xa, ya) = state.nodes[edge.source].pos();
			let (xb, yb) = state.nodes[edge.target].pos();
			let (dx, dy) = (xb - xa, yb - ya);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < 1e-6 {
				continue;
			}
			let f = cfg.link_strength * alpha * (dist - cfg.link_distance) / dist;
			let a_pinned = state.nodes[edge.source].pin.is_some();
			let b_pinned = state.nodes[edge.target].pin.is_some();
			// Each free endpoint takes half the correction, or all of it
			// when its partner is pinned.
			let (wa, wb) = match (a_pinned, b_pinned) {
				(false, false) => (0.5, 0.5),
				(false, true) => (1.0, 0.0),
				(true, false) => (0.0, 1.0),
				(true, true) => (0.0, 0.0),
			};
			acc[edge.source].0 += dx * f * wa;
			acc[edge.source].1 += dy * f * wa;
			acc[edge.target].0 -= dx * f * wb;
			acc[edge.target].1 -= dy * f * wb;
		}

		// Integrate.
		for (node, a) in state.nodes.iter_mut().zip(acc.iter()) {
			if let Some((px, py)) = node.pin {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx += a.0;
			node.vy += a.1;
			node.x += node.vx;
			node.y += node.vy;
			node.vx *= cfg.velocity_decay;
			node.vy *= cfg.velocity_decay;
		}

		// Collision: push overlapping pairs apart by overlap depth.
		for _ in 0..cfg.collision_passes {
			for i in 0..n {
				for j in (i + 1)..n {
					let (xi, yi) = state.nodes[i].pos();
					let (xj, yj) = state.nodes[j].pos();
					let (dx, dy) = (xj - xi, yj - yi);
					let dist = (dx * dx + dy * dy).sqrt();
					let overlap = state.nodes[i].radius + state.nodes[j].radius - dist;
					if overlap <= 0.0 {
						continue;
					}
					// Coincident centers have no direction to separate
					// along; pick a fixed one so the pass stays deterministic.
					let (ux, uy) = if dist < 1e-6 {
						(1.0, 0.0)
					} else {
						(dx / dist, dy / dist)
					};
					let i_pinned = state.nodes[i].pin.is_some();
					let j_pinned = state.nodes[j].pin.is_some();
					let (wi, wj) = match (i_pinned, j_pinned) {
						(false, false) => (0.5, 0.5),
						(false, true) => (1.0, 0.0),
						(true, false) => (0.0, 1.0),
						(true, true) => continue,
					};
					state.nodes[i].x -= ux * overlap * wi;
					state.nodes[i].y -= uy * overlap * wi;
					state.nodes[j].x += ux * overlap * wj;
					state.nodes[j].y += uy * overlap * wj;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::graph::{self, NODE_RADIUS};
	use super::super::sim::SimulationState;
	use super::*;

	fn fixture(num_nodes: usize, num_links: usize, seed: u64) -> (SimulationState, Vec<Edge>) {
		let mut rng = SmallRng::seed_from_u64(seed);
		let (nodes, edges) = graph::generate(&mut rng, num_nodes, num_links);
		let state = SimulationState::scattered(&nodes, &mut rng, 100.0, 100.0);
		(state, edges)
	}

	#[test]
	fn step_is_deterministic_for_a_fixed_state() {
		let (state, edges) = fixture(20, 15, 7);
		let field = ForceField::default();
		let mut a = state.clone();
		let mut b = state;
		field.step(&mut a, &edges);
		field.step(&mut b, &edges);
		for (na, nb) in a.nodes.iter().zip(b.nodes.iter()) {
			assert_eq!((na.x, na.y, na.vx, na.vy), (nb.x, nb.y, nb.vx, nb.vy));
		}
	}

	#[test]
	fn pinned_node_never_moves() {
		let (mut state, edges) = fixture(10, 8, 8);
		state.nodes[3].pin = Some((42.0, 24.0));
		let field = ForceField::default();
		for _ in 0..50 {
			field.step(&mut state, &edges);
			assert_eq!((state.nodes[3].x, state.nodes[3].y), (42.0, 24.0));
			assert_eq!((state.nodes[3].vx, state.nodes[3].vy), (0.0, 0.0));
		}
	}

	#[test]
	fn released_node_moves_again() {
		let (mut state, edges) = fixture(10, 8, 9);
		state.nodes[3].pin = Some((42.0, 24.0));
		let field = ForceField::default();
		field.step(&mut state, &edges);
		state.nodes[3].pin = None;
		for _ in 0..10 {
			field.step(&mut state, &edges);
		}
		assert_ne!((state.nodes[3].x, state.nodes[3].y), (42.0, 24.0));
	}

	#[test]
	fn positions_stay_finite_under_a_decaying_alpha() {
		let (mut state, edges) = fixture(50, 40, 10);
		let field = ForceField::default();
		for _ in 0..1000 {
			field.step(&mut state, &edges);
			state.alpha = (state.alpha * 0.977).max(0.001);
		}
		for node in &state.nodes {
			assert!(node.x.is_finite() && node.y.is_finite());
			assert!(node.vx.is_finite() && node.vy.is_finite());
		}
	}

	#[test]
	fn converged_layout_has_no_deep_overlap() {
		let (mut state, edges) = fixture(8, 6, 11);
		let field = ForceField::default();
		for _ in 0..1500 {
			field.step(&mut state, &edges);
			state.alpha = (state.alpha * 0.977).max(0.001);
		}
		for i in 0..state.nodes.len() {
			for j in (i + 1)..state.nodes.len() {
				let (dx, dy) = (
					state.nodes[j].x - state.nodes[i].x,
					state.nodes[j].y - state.nodes[i].y,
				);
				let dist = (dx * dx + dy * dy).sqrt();
				assert!(
					dist >= 2.0 * NODE_RADIUS - 0.5,
					"nodes {i} and {j} overlap: dist {dist}"
				);
			}
		}
	}
}
