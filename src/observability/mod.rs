pub mod tracing;

pub use tracing::init_tracing;
