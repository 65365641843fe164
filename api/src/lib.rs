pub mod routes;
pub mod telemetry;
pub mod upstream;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use std::time::Duration;

use crate::telemetry::LogFormat;
use crate::upstream::MaiClient;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config) -> std::io::Result<Server> {
    let mai_client = web::Data::new(
        MaiClient::new(&config.mai_backend_url, config.upstream_timeout)
            .map_err(std::io::Error::other)?,
    );

    // Clone config values for use in closure
    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    tracing::info!(
        port = config.port,
        mai_backend = %config.mai_backend_url,
        "starting portal server"
    );
    let server = HttpServer::new(move || {
        // The portal pages call the search route from the browser
        let cors = if allowed_origins.iter().any(|o| o == "*") {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            let mut cors = Cors::default()
                .allowed_methods(["GET", "POST"])
                .allow_any_header();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            .service(routes::api_services())
            .app_data(mai_client.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin (development only)
    pub allowed_origins: Vec<String>,
    /// Base URL of the MAI backend that serves document context.
    pub mai_backend_url: String,
    /// Upper bound on one forwarded search, connection included.
    pub upstream_timeout: Duration,
    pub log_format: LogFormat,
}

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, so tests need not touch the
    /// process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = required("PORT")?.trim().parse().map_err(
            |e: std::num::ParseIntError| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            },
        )?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string()) // Default to allow any origin for development
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        name: "UPSTREAM_TIMEOUT_SECS",
                        reason: e.to_string(),
                    }
                })?,
            None => DEFAULT_UPSTREAM_TIMEOUT,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(format) => format.parse().map_err(|reason| {
                ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    reason,
                }
            })?,
            None => LogFormat::default(),
        };

        let mai_backend_url = required("MAI_BACKEND_URL")?;
        if !mai_backend_url.starts_with("http://")
            && !mai_backend_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                name: "MAI_BACKEND_URL",
                reason: "expected an http(s) URL".into(),
            });
        }

        Ok(Config {
            ip: required("IP_ADDRESS")?,
            port,
            allowed_origins,
            mai_backend_url,
            upstream_timeout,
            log_format,
        })
    }
}
