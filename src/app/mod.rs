// ==========================================
// Catering Execution Hub - application layer
// ==========================================
// Wires the object graph (state) and exposes it over HTTP (http).
// ==========================================

pub mod http;
pub mod state;

// Re-export
pub use state::AppState;
