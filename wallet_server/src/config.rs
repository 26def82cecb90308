use std::{env, io::Write};

use chrono::Duration;
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use razorpay_tools::RazorpayConfig;
use tempfile::NamedTempFile;
use wallet_common::{parse_boolean_flag, Secret};

use crate::errors::ServerError;

const DEFAULT_WALLET_HOST: &str = "127.0.0.1";
const DEFAULT_WALLET_PORT: u16 = 8360;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/wallet.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::hours(24);
const MAX_TOKEN_LIFETIME_HOURS: i64 = 24 * 365;
const RANDOM_SECRET_LENGTH: usize = 64;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_db_connections: u32,
    /// If true, pending database migrations are applied when the server starts.
    pub run_migrations: bool,
    pub auth: AuthConfig,
    /// If true, the amount a client claims for a deposit is checked against the gateway's record of the order.
    pub verify_order_amount: bool,
    /// Razorpay API credentials. The key secret also signs the payment callbacks.
    pub razorpay: RazorpayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_WALLET_HOST.to_string(),
            port: DEFAULT_WALLET_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_db_connections: DEFAULT_DB_MAX_CONNECTIONS,
            run_migrations: true,
            auth: AuthConfig::default(),
            verify_order_amount: true,
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("WALLET_HOST").ok().unwrap_or_else(|| DEFAULT_WALLET_HOST.into());
        let port = env::var("WALLET_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for WALLET_PORT. {e} Using the default, {DEFAULT_WALLET_PORT}, \
                         instead."
                    );
                    DEFAULT_WALLET_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_WALLET_PORT);
        let database_url = env::var("WALLET_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ WALLET_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_db_connections = env::var("WALLET_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| {
                s.parse::<u32>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for WALLET_DB_MAX_CONNECTIONS. {e}"))
                    .ok()
            })
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
        let run_migrations = parse_boolean_flag(env::var("WALLET_RUN_MIGRATIONS").ok(), true);
        let verify_order_amount = parse_boolean_flag(env::var("WALLET_VERIFY_ORDER_AMOUNT").ok(), true);
        if !verify_order_amount {
            warn!(
                "🚨️ WALLET_VERIFY_ORDER_AMOUNT is off. Deposit amounts will be taken from the client without checking \
                 them against the payment gateway."
            );
        }
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        let razorpay = RazorpayConfig::new_from_env_or_default();
        Self { host, port, database_url, max_db_connections, run_migrations, auth, verify_order_amount, razorpay }
    }

    pub fn options(&self) -> ServerOptions {
        ServerOptions::from_config(self)
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HMAC-SHA256 key used to sign and verify access tokens.
    pub jwt_secret: Secret<String>,
    /// How long an access token remains valid after it is issued.
    pub token_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let mut tmpfile = NamedTempFile::new().ok().and_then(|f| f.keep().ok());
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. DO NOT operate \
             on production like this since all sessions will be lost when the server restarts. 🚨️🚨️🚨️"
        );
        let secret = random_secret();
        match &mut tmpfile {
            Some((f, p)) => match writeln!(f, "{secret}") {
                Ok(()) => warn!(
                    "🚨️🚨️🚨️ The JWT signing secret for this session was written to {}. If this is a production \
                     instance, you are doing it wrong! Set the WALLET_JWT_SECRET environment variable instead. \
                     🚨️🚨️🚨️",
                    p.to_str().unwrap_or("???")
                ),
                Err(e) => warn!("🪛️ Could not write the JWT signing secret to the temporary file. {e}"),
            },
            None => {
                warn!("🪛️ Could not create a temporary file to store the JWT signing secret. ");
            },
        }
        Self { jwt_secret: Secret::new(secret), token_lifetime: DEFAULT_TOKEN_LIFETIME }
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: &str, token_lifetime: Duration) -> Self {
        Self { jwt_secret: Secret::new(jwt_secret.to_string()), token_lifetime }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("WALLET_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [WALLET_JWT_SECRET]")))?;
        if secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError("WALLET_JWT_SECRET is empty".to_string()));
        }
        let token_lifetime = token_lifetime_from(env::var("WALLET_TOKEN_LIFETIME_HOURS").ok());
        Ok(Self { jwt_secret: Secret::new(secret), token_lifetime })
    }
}

/// Parses `WALLET_TOKEN_LIFETIME_HOURS`. Missing, unparseable, non-positive and absurdly long lifetimes all fall back
/// to the default.
fn token_lifetime_from(value: Option<String>) -> Duration {
    let Some(value) = value else {
        info!(
            "🪛️ WALLET_TOKEN_LIFETIME_HOURS is not set. Using the default value of {} hrs.",
            DEFAULT_TOKEN_LIFETIME.num_hours()
        );
        return DEFAULT_TOKEN_LIFETIME;
    };
    match value.trim().parse::<i64>() {
        Ok(h) if (1..=MAX_TOKEN_LIFETIME_HOURS).contains(&h) => Duration::hours(h),
        Ok(h) => {
            warn!(
                "🪛️ WALLET_TOKEN_LIFETIME_HOURS must be between 1 and {MAX_TOKEN_LIFETIME_HOURS}, but was {h}. Using \
                 the default value of {} hrs.",
                DEFAULT_TOKEN_LIFETIME.num_hours()
            );
            DEFAULT_TOKEN_LIFETIME
        },
        Err(e) => {
            warn!("🪛️ Invalid configuration value for WALLET_TOKEN_LIFETIME_HOURS. {e}");
            DEFAULT_TOKEN_LIFETIME
        },
    }
}

fn random_secret() -> String {
    thread_rng().sample_iter(&Alphanumeric).take(RANDOM_SECRET_LENGTH).map(char::from).collect()
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that is used to configure the server's behaviour. Generally we try to keep this
/// as small as possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub verify_order_amount: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { verify_order_amount: true }
    }
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { verify_order_amount: config.verify_order_amount }
    }
}
