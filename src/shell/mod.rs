// Composition root.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete infrastructure implementations.
// - Wire implementations into use case handlers.
// - Spawn the tick consumer worker.

pub mod config;
pub mod http;
pub mod state;
