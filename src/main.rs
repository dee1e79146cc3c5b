//! Canvas Relay
//!
//! `serve` runs the relay; every other subcommand drives the upload
//! workflow against a running relay.

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use canvas_relay::api;
use canvas_relay::cli::{self, Cli, Command};
use canvas_relay::config::Settings;
use canvas_relay::providers::PrintifyClient;
use canvas_relay::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    init_tracing(matches!(args.command, Command::Serve));

    let settings = Settings::load().context("Failed to load configuration")?;

    match args.command {
        Command::Serve => serve(settings).await,
        command => cli::run(command, &settings).await,
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("canvas_relay=info,actix_web=info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.compact().with_target(false).with_writer(std::io::stderr).init();
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    info!(
        "Starting Canvas Relay v{} on {}",
        env!("CARGO_PKG_VERSION"),
        bind_addr
    );

    // Refuse to start without the upstream credential
    let printify = PrintifyClient::new(&settings.upstream)
        .context("Cannot start relay: set CANVAS_UPSTREAM__API_TOKEN")?;
    info!(upstream = %printify.base_url(), rate_limit = settings.upstream.rate_limit_per_minute, "Upstream configured");

    let workers = settings.server.workers.unwrap_or_else(|| num_cpus::get() * 2);
    let payload_limit_mb = settings.server.payload_limit_mb;

    let app_state = web::Data::new(AppState { settings, printify });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(api::json_config(payload_limit_mb))
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Service", "canvas-relay"))
                    .add(("X-Version", env!("CARGO_PKG_VERSION")))
            )
            .configure(api::configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}
