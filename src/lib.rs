pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::config::MetaConfig;
pub use crate::core::error::{MetaError, MetaResult};
pub use crate::core::pipeline::{InvocationResponse, Pipeline, RunOutput};
pub use crate::core::publish::{DirectorySink, DocumentSink, HttpPutSink};

/// Initialize structured logging. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quilt_meta=debug")),
        )
        .init();
}
