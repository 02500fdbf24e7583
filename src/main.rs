use actix_cors::Cors;
use actix_web::dev::Service;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use flight_booking_server::config::CorsConfig;
use flight_booking_server::{api, telemetry, AppState, Settings};
use std::net::TcpListener;
use tracing::{info, Instrument};

fn cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        // Same-origin only.
        return Cors::default();
    }

    let cors = if config.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
    };

    cors.max_age(config.max_age as usize)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    telemetry::init_tracing();

    let config = Settings::new().context("failed to load configuration")?;
    info!(environment = %config.environment, "Configuration loaded successfully");

    let state = AppState::new(config.clone())
        .await
        .context("failed to initialise application state")?;
    let state = web::Data::new(state);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("failed to bind {}", address))?;
    info!("Starting server at {}", address);

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_config))
            .wrap_fn(|req, srv| {
                let span = telemetry::request_span(&req);
                srv.call(req).instrument(span)
            })
            .app_data(state.clone())
            .configure(api::configure)
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .context("server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}
