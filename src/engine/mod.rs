//! Force-directed layout engine.
//!
//! Everything under this module is plain Rust with no browser bindings:
//! graph generation, the four-force simulation step, the stabilization
//! state machine with its timestamped lifecycle records, the pan/zoom
//! camera and drag pinning. The host (a leptos component in this crate)
//! drives it once per animation frame and forwards its event records to
//! whatever wants to measure draw and stabilization times.

mod forces;
mod graph;
mod runtime;
mod settings;
mod sim;
mod stabilize;
mod viewport;

pub use forces::{ForceConfig, ForceField};
pub use graph::{Edge, NODE_RADIUS, Node, generate};
pub use runtime::{FrameSink, FrameSnapshot, GraphEngine, HIT_RADIUS};
pub use settings::{Backend, EngineError, MAX_LINKS, MAX_NODES, Settings};
pub use sim::{SimNode, SimulationState};
pub use stabilize::{EngineEvent, EventKind, Phase, Stabilizer, StabilizerConfig};
pub use viewport::{Camera, Viewport};
