pub mod fetch_flow;
pub mod mesa_ctx;
pub mod progress;

pub use fetch_flow::{FetchFlow, RunAccumulator};
pub use mesa_ctx::MesaCtx;
pub use progress::{linear_eta, ProgressTracker};
