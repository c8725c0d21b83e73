use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use listing_service::middleware::JwtAuthMiddleware;
use listing_service::{auth::jwt, config::Config, db, handlers};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Support container healthchecks via CLI subcommand: `healthcheck-http` or legacy `healthcheck`
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" || cmd == "healthcheck-http" {
                let port = std::env::var("LISTING_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or(8080);
                let url = format!("http://127.0.0.1:{}/api/v1/health", port);
                match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => return Ok(()),
                    Ok(resp) => {
                        eprintln!("healthcheck HTTP status: {}", resp.status());
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"));
                    }
                    Err(e) => {
                        eprintln!("healthcheck HTTP error: {}", e);
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"));
                    }
                }
            }
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting listing-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    match &config.jwt.public_key_pem {
        Some(pem) => {
            if let Err(err) = jwt::initialize_validation_key(pem) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize JWT key: {err}"),
                ));
            }
            tracing::info!("JWT validation key initialized");
        }
        None => {
            tracing::warn!(
                "JWT public key not configured; authentication middleware will fail requests"
            );
        }
    }

    // Create database connection pool
    let db_pool = db::create_pool(&config.database.url, config.database.max_connections)
        .await
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("Failed to create database pool: {}", e),
            )
        })?;

    tracing::info!(
        "Database pool created with {} max connections",
        config.database.max_connections
    );

    // Run migrations in non-production unless explicitly skipped
    let run_migrations_env = std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".into());
    if !config.is_production() && run_migrations_env != "false" {
        tracing::info!("Running database migrations...");
        match db::run_migrations(&db_pool).await {
            Ok(_) => tracing::info!("Database migrations completed"),
            Err(e) => {
                tracing::warn!("Skipping migrations due to error: {:#}", e);
            }
        }
    } else {
        tracing::info!(
            "Skipping database migrations (RUN_MIGRATIONS={})",
            run_migrations_env
        );
    }

    let server_config = config.clone();
    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        // Build CORS configuration from allowed_origins
        let mut cors = Cors::default();
        for origin in server_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            // Health check endpoints
            .route("/api/v1/health", web::get().to(handlers::health_check))
            .route(
                "/api/v1/health/ready",
                web::get().to(handlers::readiness_check),
            )
            .route(
                "/api/v1/health/live",
                web::get().to(handlers::liveness_check),
            )
            // One generic listing scope serves every category
            .service(
                web::scope("/api/{category}")
                    .route("", web::get().to(handlers::list_listings))
                    .route("/{id}", web::get().to(handlers::get_listing))
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("", web::post().to(handlers::create_listing))
                            .route("/like/{id}", web::put().to(handlers::like_listing))
                            .route("/unlike/{id}", web::put().to(handlers::unlike_listing))
                            .route("/comment/{id}", web::post().to(handlers::create_comment))
                            .route(
                                "/comment/{id}/{comment_id}",
                                web::delete().to(handlers::delete_comment),
                            )
                            .route("/{id}", web::delete().to(handlers::delete_listing)),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run();

    server.await
}
