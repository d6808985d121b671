use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use innerconnect::config::{LoggingSettings, Settings, DEFAULT_JWT_SECRET};
use innerconnect::{configure_app, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(logging: Option<&LoggingSettings>) {
    let level = logging.map(|l| l.level.as_str()).unwrap_or("info");
    let format = logging.map(|l| l.format.as_str()).unwrap_or("json");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_tracing(settings.as_ref().ok().map(|s| &s.logging));

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })?;

    info!("Starting InnerConnect API...");

    if settings.auth.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("auth.jwt_secret is the built-in default; set JWT_ACCESS_SECRET before deploying");
    }
    if settings.auth.demo_login {
        warn!("Demo login is enabled: tokens are issued without credential verification");
    }

    let app_state = AppState::from_settings(&settings);

    info!(
        "Token TTL {}s, match threshold {}, company domain {}",
        settings.auth.token_ttl_secs, settings.matching.threshold, settings.signup.company_domain
    );

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .configure(configure_app(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
