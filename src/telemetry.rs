use actix_web::dev::ServiceRequest;
use tracing::{info_span, Span};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// A span tagging every event logged while serving `req` with a fresh request id.
pub fn request_span(req: &ServiceRequest) -> Span {
    info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        path = %req.path()
    )
}
