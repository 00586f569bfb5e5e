// Library surface for headless/integration tests and reuse.
// Rendering and the terminal frontend stay in the binary.
pub mod config;
pub mod difficulty;
pub mod events;
pub mod indicator;
pub mod runtime;
pub mod session;
pub mod track;
