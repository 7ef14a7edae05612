use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::FromRef,
    http::{
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    analytics::services::AnalyticsService,
    database::PostgresConnection,
    identities::services::{DynRateLimiter, IdentityService},
    portfolio::services::PortfolioService,
    rate_limit::RedisRateLimiter,
    repos::{DynAccountRepo, DynTransactionRepo, DynUserRepo},
};

pub struct Options {
    pub database_pool_size: u32,
    pub database_timeout_seconds: u8,
    pub database_url: String,

    pub frontend_origin: String,

    pub redis_url: String,
}

#[derive(Clone)]
pub struct AppState {
    analytics_service: AnalyticsService,
    identity_service: IdentityService,
    portfolio_service: PortfolioService,
}

pub async fn serve(opts: Options) -> anyhow::Result<()> {
    let db = PostgresConnection::connect(
        &opts.database_url,
        opts.database_pool_size,
        Duration::from_secs(opts.database_timeout_seconds.into()),
    )
    .await
    .context("Failed to connect to the database.")?;

    let rate_limiter: DynRateLimiter = Arc::new(RedisRateLimiter::new(&opts.redis_url)?);

    let user_repo: DynUserRepo = Arc::new(db.clone());
    let account_repo: DynAccountRepo = Arc::new(db.clone());
    let transaction_repo: DynTransactionRepo = Arc::new(db);

    let state = AppState {
        analytics_service: AnalyticsService::new(transaction_repo.clone()),
        identity_service: IdentityService::new(rate_limiter, user_repo),
        portfolio_service: PortfolioService::new(account_repo, transaction_repo),
    };

    let cors = CorsLayer::new()
        .allow_credentials(true)
        .allow_headers([ACCEPT, CONTENT_TYPE, ORIGIN])
        .allow_methods([Method::DELETE, Method::GET, Method::OPTIONS, Method::POST])
        .allow_origin(
            opts.frontend_origin
                .parse::<HeaderValue>()
                .context("Failed to parse the frontend origin.")?,
        );

    let app = Router::new()
        .nest("/api/auth", crate::identities::http::routes())
        .nest("/api/portfolio", crate::portfolio::http::routes())
        .nest("/api/analytics", crate::analytics::http::routes())
        .layer(cors)
        .with_state(state);

    axum::Server::bind(&"0.0.0.0:8000".parse().unwrap())
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

impl FromRef<AppState> for AnalyticsService {
    fn from_ref(state: &AppState) -> Self {
        state.analytics_service.clone()
    }
}

impl FromRef<AppState> for IdentityService {
    fn from_ref(state: &AppState) -> Self {
        state.identity_service.clone()
    }
}

impl FromRef<AppState> for PortfolioService {
    fn from_ref(state: &AppState) -> Self {
        state.portfolio_service.clone()
    }
}
