use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing, Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};
use url::Url;

pub const SUBMIT_ROUTE: &str = "/submit";

/// Submissions with this name are answered with a non-JSON body.
pub const MALFORMED_RESPONSE_NAME: &str = "respond-malformed";

const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "message", "access_key"];

pub async fn start_server(host: IpAddr, port: u16, access_key: String) -> anyhow::Result<()> {
    info!("Starting form relay testing server on {host}:{port}");
    info!("Form relay submit endpoint: http://{host}:{port}{SUBMIT_ROUTE}");
    info!("Access key: {access_key:?}");
    info!(
        "Submissions named {MALFORMED_RESPONSE_NAME:?} receive a malformed response, all other \
         submissions with a valid access key succeed"
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    serve(listener, access_key).await
}

/// Start a server on a random local port in the background and return its
/// submit endpoint.
pub async fn spawn_server(access_key: impl Into<String>) -> anyhow::Result<Url> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;

    let access_key = access_key.into();
    tokio::spawn(async move {
        if let Err(err) = serve(listener, access_key).await {
            error!("Form relay testing server failed: {err:#}");
        }
    });

    submit_url(addr)
}

pub fn submit_url(addr: SocketAddr) -> anyhow::Result<Url> {
    format!("http://{addr}{SUBMIT_ROUTE}")
        .parse()
        .context("Failed to build submit url")
}

pub fn router(access_key: String) -> Router {
    Router::new()
        .route(SUBMIT_ROUTE, routing::post(submit))
        .with_state(access_key.into())
}

async fn serve(listener: TcpListener, access_key: String) -> anyhow::Result<()> {
    axum::serve(listener, router(access_key))
        .await
        .context("Failed to start HTTP server")
}

#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    message: String,
}

fn respond(status: StatusCode, success: bool, message: impl Into<String>) -> Response {
    let body = SubmitResponse {
        success,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

async fn submit(state: State<Arc<str>>, mut multipart: Multipart) -> Response {
    let mut fields = HashMap::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return respond(err.status(), false, err.body_text()),
        };
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        match field.text().await {
            Ok(value) => {
                fields.insert(name, value);
            }
            Err(err) => return respond(err.status(), false, err.body_text()),
        }
    }

    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|key| !fields.contains_key(*key))
    {
        return respond(
            StatusCode::BAD_REQUEST,
            false,
            format!("Missing required field: {missing}"),
        );
    }

    if *fields["access_key"] != **state {
        return respond(StatusCode::UNAUTHORIZED, false, "Invalid access key");
    }

    if fields["name"] == MALFORMED_RESPONSE_NAME {
        return (
            StatusCode::BAD_GATEWAY,
            Html("<html><body><h1>502 Bad Gateway</h1></body></html>"),
        )
            .into_response();
    }

    info!(name = %fields["name"], email = %fields["email"], "accepted submission");
    respond(StatusCode::OK, true, "Email sent successfully!")
}
