/*
 * Responsibility
 * - Config読み込み → 依存生成 (repositories の bind) → Router 組み立て
 * - Middleware の適用 (HTTP layers / access token gate)
 * - axum::serve() で起動、終了時に repositories を close
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Result, bail};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StorageBackend};
use crate::repos::{MemoryStore, PgStore, Repositories};
use crate::services::auth::TokenService;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG=info,rest_ws=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} (storage: {})",
        config.app_env,
        config.addr,
        config.storage.name()
    );

    let repos = Arc::new(build_repositories(&config).await?);
    // bind once before serving; an unbound registry is a startup-ordering bug
    if !repos.is_bound() {
        bail!("repositories must be bound before serving");
    }

    let auth = Arc::new(TokenService::new(
        &config.jwt_secret,
        config.access_token_ttl_seconds,
    ));
    let state = AppState::new(auth, repos.clone());
    let app = build_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped, closing repositories");
    repos.close().await?;
    Ok(())
}

async fn build_repositories(config: &Config) -> Result<Repositories> {
    let repos = match &config.storage {
        StorageBackend::Memory => {
            Repositories::with_backend(Arc::new(MemoryStore::new(config.page_size)))?
        }
        StorageBackend::Postgres { database_url } => {
            let store = PgStore::connect(
                database_url,
                config.database_max_connections,
                config.page_size,
            )
            .await?;
            store.migrate().await?;
            Repositories::with_backend(Arc::new(store))?
        }
    };

    Ok(repos)
}

/// Routes + access gate + HTTP layers, ready to serve.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let router = middleware::auth::access::apply(api::routes(), state.clone()).with_state(state);

    middleware::http::apply(router, request_timeout)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
