//! Tracing setup with optional OpenTelemetry export.

use crate::config::ServerConfig;
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Quick TCP check so a configured but absent collector doesn't stall export.
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/');

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

struct OtelProviders {
    tracer: SdkTracerProvider,
    logger: SdkLoggerProvider,
}

fn build_providers(endpoint: &str, service_name: &str) -> Result<OtelProviders, String> {
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| format!("trace exporter: {e}"))?;

    let tracer = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| format!("log exporter: {e}"))?;

    let logger = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok(OtelProviders { tracer, logger })
}

/// Install the global subscriber.
///
/// Console output is always on and filtered by `RUST_LOG`. If an OTLP
/// endpoint is configured and reachable, traces and logs are exported too.
pub fn init_telemetry(config: &ServerConfig) {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    let Some(endpoint) = config.otel_endpoint.as_deref() else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return;
    };

    if !collector_reachable(endpoint) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return;
    }

    match build_providers(endpoint, &config.otel_service_name) {
        Ok(providers) => {
            let tracer = providers.tracer.tracer(config.otel_service_name.clone());
            opentelemetry::global::set_tracer_provider(providers.tracer);

            let otel_trace_layer = tracing_opentelemetry::layer().with_tracer(tracer);
            let otel_log_layer = OpenTelemetryTracingBridge::new(&providers.logger);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(otel_trace_layer)
                .with(otel_log_layer)
                .init();

            tracing::info!(
                "OpenTelemetry enabled, exporting traces and logs to {} as {}",
                endpoint,
                config.otel_service_name
            );
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
            tracing::warn!(
                error = %e,
                "Failed to set up OpenTelemetry export, using console logging only"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_collector() {
        // Port 9 (discard) on localhost is essentially never listening in CI.
        assert!(!collector_reachable("http://127.0.0.1:9"));
        assert!(!collector_reachable("not a host"));
    }
}
