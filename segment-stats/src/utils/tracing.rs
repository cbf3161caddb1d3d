use std::sync::Once;

static INIT: Once = Once::new();

use tracing::warn;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber once per process: a registry with an
/// OpenTelemetry layer exporting to the local Jaeger agent.
pub fn init_tracer() {
    INIT.call_once(|| {
        let tracer = match opentelemetry_jaeger::new_agent_pipeline()
            .with_service_name("segment-stats")
            .install_simple()
        {
            Ok(tracer) => tracer,
            Err(err) => {
                eprintln!("jaeger pipeline unavailable: {err}");
                return;
            }
        };
        let opentelemetry = tracing_opentelemetry::layer().with_tracer(tracer);
        if tracing_subscriber::registry()
            .with(opentelemetry)
            .try_init()
            .is_err()
        {
            warn!("a global subscriber was already installed");
        }
    });
}
