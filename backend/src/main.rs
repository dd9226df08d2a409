//! Service entry-point: loads configuration, prepares storage and serves the
//! REST API.

mod server;

use std::ffi::OsString;
use std::net::{Ipv4Addr, SocketAddr};

use color_eyre::eyre::{WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lang_learn::config::{BuildMode, DatabaseSettings, ServiceSettings, token_secret_from_env};
use lang_learn::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // Settings come from the environment and configuration files only.
    let args = || [OsString::from("lang-learn")];
    let settings =
        ServiceSettings::load_from_iter(args()).map_err(|e| eyre!("load service settings: {e}"))?;
    let database = DatabaseSettings::load_from_iter(args())
        .map_err(|e| eyre!("load database settings: {e}"))?;

    let secret = token_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("load token secret")?;

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port()));
    let mut config = ServerConfig::new(bind_addr, secret)
        .with_tokens(settings.token_issuer(), settings.token_ttl())
        .with_bcrypt_cost(settings.bcrypt_cost())
        .with_version(settings.version());

    if let Some(url) = database.url() {
        run_migrations(&url).await.wrap_err("migrate database")?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .wrap_err("connect to database")?;
        config = config.with_db_pool(pool);
    }

    info!(
        environment = settings.environment(),
        version = settings.version(),
        %bind_addr,
        "starting lang-learn service"
    );
    create_server(config)?.await?;
    Ok(())
}
