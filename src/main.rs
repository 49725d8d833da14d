use std::sync::Arc;

use liftlog::api::{HttpMailer, LogMailer, Mailer};
use liftlog::auth::TokenKeys;
use liftlog::config::Config;
use liftlog::db::{self, ExerciseCatalog, UserStore, WorkoutStore};
use liftlog::router::{LiftState, lift_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        bind_addr = %cfg.bind_addr,
        public_base_url = %cfg.public_base_url,
        loglevel = %cfg.loglevel,
        mail_configured = cfg.mail.is_configured()
    );

    let pool = db::connect(&cfg.database_url).await?;
    db::init_schema(&pool).await?;

    let catalog = ExerciseCatalog::new(pool.clone());
    catalog.seed_if_empty().await?;

    let mailer: Arc<dyn Mailer> = match HttpMailer::from_config(&cfg.mail)? {
        Some(mailer) => Arc::new(mailer),
        None => {
            info!("mail transport not configured, confirmation links will be logged");
            Arc::new(LogMailer)
        }
    };

    let state = LiftState {
        users: UserStore::new(pool.clone()),
        workouts: WorkoutStore::new(pool),
        catalog,
        keys: TokenKeys::new(&cfg.jwt_secret),
        mailer,
        public_base_url: cfg.public_base_url.clone(),
    };
    let app = lift_router(state);

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    info!("HTTP server listening on {}", cfg.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
