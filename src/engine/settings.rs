//! Run configuration and engine error types.

use thiserror::Error;

/// Upper bound accepted for the node count input.
pub const MAX_NODES: i64 = 100_000;
/// Upper bound accepted for the link count input.
pub const MAX_LINKS: i64 = 100_000;

/// Rendering back-end selector. The engine itself is agnostic; this only
/// picks which [`FrameSink`](super::runtime::FrameSink) the host wires up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
	/// Canvas-2D immediate-mode drawing.
	Canvas,
	/// Retained SVG markup.
	Svg,
}

/// Validated run configuration. Immutable once a run starts; submitting a
/// new `Settings` discards the current run and begins a fresh one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
	/// Number of nodes to generate, in `[1, MAX_NODES]`.
	pub num_nodes: usize,
	/// Number of links to generate, in `[0, MAX_LINKS]`. Clamped to the
	/// node count at generation time.
	pub num_links: usize,
	/// Which render back-end the host should drive.
	pub backend: Backend,
}

impl Settings {
	/// Validate raw input counts. Rejection leaves any prior run untouched:
	/// an engine is only ever handed a `Settings` that passed this check.
	pub fn new(num_nodes: i64, num_links: i64, backend: Backend) -> Result<Self, EngineError> {
		if num_nodes < 1 {
			return Err(EngineError::InvalidSettings(format!(
				"number of nodes must be at least 1, got {num_nodes}"
			)));
		}
		if num_nodes > MAX_NODES {
			return Err(EngineError::InvalidSettings(format!(
				"number of nodes must be at most {MAX_NODES}, got {num_nodes}"
			)));
		}
		if num_links < 0 {
			return Err(EngineError::InvalidSettings(format!(
				"number of links must not be negative, got {num_links}"
			)));
		}
		if num_links > MAX_LINKS {
			return Err(EngineError::InvalidSettings(format!(
				"number of links must be at most {MAX_LINKS}, got {num_links}"
			)));
		}
		Ok(Self {
			num_nodes: num_nodes as usize,
			num_links: num_links as usize,
			backend,
		})
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			num_nodes: 10,
			num_links: 8,
			backend: Backend::Canvas,
		}
	}
}

/// Everything that can go wrong inside the engine. None of these are fatal:
/// the worst outcome of any misuse is a rejected configuration or a no-op.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
	/// A configuration change was rejected before a run started.
	#[error("invalid settings: {0}")]
	InvalidSettings(String),
	/// A drag gesture referenced a node id not present in the current run.
	#[error("unknown node id {0}")]
	UnknownNode(usize),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_bounds() {
		assert!(Settings::new(1, 0, Backend::Canvas).is_ok());
		assert!(Settings::new(MAX_NODES, MAX_LINKS, Backend::Svg).is_ok());
	}

	#[test]
	fn rejects_zero_or_negative_nodes() {
		for n in [0, -1, -100] {
			let err = Settings::new(n, 0, Backend::Canvas).unwrap_err();
			assert!(matches!(err, EngineError::InvalidSettings(_)));
		}
	}

	#[test]
	fn rejects_negative_links() {
		let err = Settings::new(5, -1, Backend::Canvas).unwrap_err();
		assert!(matches!(err, EngineError::InvalidSettings(_)));
	}

	#[test]
	fn rejects_out_of_range_counts() {
		assert!(Settings::new(MAX_NODES + 1, 0, Backend::Canvas).is_err());
		assert!(Settings::new(5, MAX_LINKS + 1, Backend::Canvas).is_err());
	}
}
