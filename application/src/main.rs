use std::{
    future::IntoFuture as _,
    io,
    sync::{Arc, OnceLock},
    time,
};

use application::{api, args, graphql, rest, subscriptions, Args, Config};
use axum::{
    extract::MatchedPath,
    routing::{get, on, post, MethodFilter},
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use futures::{future, TryFutureExt as _};
use secrecy::SecretBox;
use service::{
    command::{self, Command as _},
    domain::{admin, contact::Email},
    infra::{postgres, Postgres},
    Service,
};
use tokio::net::TcpListener;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    trace::TraceLayer,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

/// [`log::Level`]s written to `stderr` instead of `stdout`.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Maximum [`log::Level`] to write, set once the [`Config`] is loaded.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

postgres::embed_migrations!("../migrations");

#[tokio::main]
async fn main() {
    init_logging();

    _ = start().await;
}

/// Initializes the global [`tracing`] subscriber, writing warnings and errors
/// to `stderr` and everything else to `stdout`.
fn init_logging() {
    fn layer<S, W>(
        writer: W,
        to_stderr: bool,
    ) -> impl tracing_subscriber::Layer<S>
    where
        S: log::Subscriber
            + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
        W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + 'static,
    {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(true)
            .with_thread_names(true)
            .with_writer(writer)
            .with_filter(filter_fn(move |meta| {
                let max = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
                meta.is_span()
                    || STDERR_LEVELS.contains(meta.level()) == to_stderr
                        && max >= *meta.level()
            }))
    }

    tracing_subscriber::registry()
        .with(layer(io::stdout, false))
        .with(layer(io::stderr, true))
        .init();
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        postgres,
        service,
        server,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let mut postgres = Postgres::new(&postgres.into()).map_err(|e| {
        log::error!("failed to initialize `Postgres` client: {e}");
    })?;
    let report = migrations::runner()
        .run_async(&mut postgres)
        .await
        .map_err(|e| {
            log::error!("failed to run database migrations: {e}");
        })?;
    for migration in report.applied_migrations() {
        log::info!("applied `{migration}` database migration");
    }

    let (service, background) = Service::new(service.into(), postgres);

    if let Some(cmd) = command {
        return run(cmd, &service).await;
    }

    let origins = server.cors.allow_origin().map_err(|e| {
        log::error!("invalid CORS origins `{:?}`: {e}", server.cors.origins);
    })?;
    let cors = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::OPTIONS,
            http::Method::POST,
        ])
        .allow_headers([
            http::header::AUTHORIZATION,
            http::header::CONTENT_TYPE,
        ])
        .allow_origin(origins);

    let schema = api::Schema::new(api::Query, api::Mutation, api::Subscription);

    let app = Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .route("/subscriptions", get(subscriptions))
        .route("/counters", get(rest::counters))
        .route("/hero-content", get(rest::hero_content))
        .route("/testimonials", get(rest::testimonials))
        .route("/inquiries", post(rest::submit_inquiry))
        .layer(Extension(Arc::new(schema)))
        .layer(Extension(service))
        .layer(Extension(rest::AnonKey(server.anon_key)))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(http_span)
                .on_response(
                    |r: &http::Response<_>,
                     dur: time::Duration,
                     span: &log::Span| {
                        span.record(
                            "http.status_code",
                            log::field::display(r.status().as_u16()),
                        );
                        let duration = format!("{}ms", dur.as_millis());
                        if r.status().is_client_error() {
                            log::warn!(duration = duration.as_str());
                        } else {
                            log::info!(duration = duration.as_str());
                        }
                    },
                )
                .on_failure(
                    |class: ServerErrorsFailureClass,
                     dur: time::Duration,
                     _: &log::Span| {
                        log::error!(
                            duration = format!("{}ms", dur.as_millis()),
                            "request failed: {class}",
                        );
                    },
                ),
        );

    let listener = TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|e| {
            log::error!(
                "failed to listen on `{}:{}`: {e}",
                server.host,
                server.port,
            );
        })?;

    log::info!("listening on `{}:{}`", server.host, server.port);

    future::try_join(
        axum::serve(listener, app)
            .into_future()
            .map_err(|e| log::error!("webserver failed: {e}")),
        background.into_future().map_err(|e| {
            log::error!("background task failed: {e}");
        }),
    )
    .await
    .map(drop)
}

/// Creates a [`log::Span`] of the provided HTTP request.
fn http_span(r: &http::Request<axum::body::Body>) -> log::Span {
    log::info_span!(
        "HTTP request",
        http.client_ip = InsecureClientIp::from(r.headers(), r.extensions())
            .map(|ip| ip.0.to_string())
            .ok(),
        http.flavor = ?r.version(),
        http.host = r.uri().host(),
        http.method = r.method().as_str(),
        http.route = r
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str),
        http.target = r
            .uri()
            .path_and_query()
            .map(http::uri::PathAndQuery::as_str),
        http.user_agent = r
            .headers()
            .get(http::header::USER_AGENT)
            .and_then(|h| h.to_str().ok()),
        http.status_code = log::field::Empty,
    )
}

/// Runs the provided one-off [`args::Command`] against the [`Service`].
async fn run(
    cmd: args::Command,
    service: &application::Service,
) -> Result<(), ()> {
    match cmd {
        args::Command::CreateAdmin { email, password } => {
            let email = Email::new(email.trim()).ok_or_else(|| {
                log::error!("`{email}` is not a valid email");
            })?;
            let password = admin::Password::new(password).ok_or_else(|| {
                log::error!("password must be 8 to 128 characters long");
            })?;

            let admin = service
                .execute(command::CreateAdmin {
                    email,
                    password: SecretBox::new(Box::new(password)),
                })
                .await
                .map_err(|e| log::error!("failed to create admin: {e}"))?;
            log::info!("created admin `{}` <{}>", admin.id, admin.email);
            Ok(())
        }
    }
}
