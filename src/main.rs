use std::{process, sync::Arc, time::Duration};

use brusio::{
    application::{
        error::AppError,
        feed::FeedService,
        follow::FollowService,
        repos::{CommentsRepo, FollowsRepo, GroupsRepo, PostsRepo, PostsWriteRepo, UsersRepo},
        timeline::TimelineService,
    },
    cache::{CacheConfig, HomeFeedCache},
    config,
    infra::{db::PostgresRepositories, error::InfraError, http, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let url = settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| InfraError::configuration("database.url is required"))?;

    let pool = PostgresRepositories::connect(url, settings.database.max_connections.get())
        .await
        .map_err(|err| InfraError::database(err.to_string()))?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| InfraError::database(format!("migrations failed: {err}")))?;

    let repositories = Arc::new(PostgresRepositories::new(pool));
    let state = build_http_state(repositories, &settings);

    serve_http(&settings, state).await
}

fn build_http_state(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> http::HttpState {
    let posts: Arc<dyn PostsRepo> = repositories.clone();
    let posts_write: Arc<dyn PostsWriteRepo> = repositories.clone();
    let users: Arc<dyn UsersRepo> = repositories.clone();
    let groups: Arc<dyn GroupsRepo> = repositories.clone();
    let comments: Arc<dyn CommentsRepo> = repositories.clone();
    let follows: Arc<dyn FollowsRepo> = repositories.clone();

    let feed = Arc::new(FeedService::new(
        posts.clone(),
        users.clone(),
        groups.clone(),
        follows.clone(),
        settings.feed.page_size.get(),
    ));
    let timeline = Arc::new(TimelineService::new(posts, posts_write, groups, comments));
    let follow = Arc::new(FollowService::new(users.clone(), follows));
    let home_cache = Arc::new(HomeFeedCache::new(&CacheConfig::from(&settings.cache)));

    http::HttpState {
        feed,
        timeline,
        follows: follow,
        users,
        home_cache,
        db: Some(repositories),
    }
}

async fn serve_http(settings: &config::Settings, state: http::HttpState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(addr = %settings.server.addr, "listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(settings.server.graceful_shutdown))
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))
}

async fn shutdown_signal(grace: Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        error!("failed to listen for shutdown signal");
        return;
    }
    info!(grace_seconds = grace.as_secs(), "shutdown signal received");

    // Hard stop if draining outlives the configured grace period.
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        warn!("graceful shutdown grace period elapsed, exiting");
        process::exit(0);
    });
}
