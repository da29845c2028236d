use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

/// Local part of recipient addresses the fake server refuses to send to.
pub const REJECTED_LOCAL_PART: &str = "rejected";

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend api endpoint: http://{host}:{port}/");
    info!("API key: {api_key:?}");
    info!("Emails to recipients with the local part {REJECTED_LOCAL_PART:?} are rejected");

    let router = FakeResend::new(api_key).router();

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

/// In-memory imitation of the resend email api.
#[derive(Debug, Clone)]
pub struct FakeResend {
    api_key: Arc<str>,
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub id: Uuid,
    pub request: SendEmailRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendEmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub reply_to: Vec<String>,
}

#[derive(Serialize)]
struct SendEmailResponse {
    id: Uuid,
}

impl FakeResend {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
            sent: Default::default(),
        }
    }

    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(EMAILS_ROUTE, routing::post(send_email))
            .with_state(self.clone())
    }

    /// Serve the fake api on a random local port in the background.
    pub async fn spawn(&self) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("Failed to bind to a local port")?;
        let addr = listener.local_addr()?;
        let router = self.router();
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                error!("resend testing server failed: {err}");
            }
        });
        Ok(addr)
    }

    /// All emails accepted so far.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

async fn send_email(
    State(state): State<FakeResend>,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
    else {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "missing_api_key",
            "Missing API key in the authorization header",
        );
    };

    if token != &*state.api_key {
        return error_response(StatusCode::FORBIDDEN, "invalid_api_key", "API key is invalid");
    }

    if let Some(recipient) = request.to.iter().find(|to| is_rejected(to)) {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            &format!("Sending to {recipient} is not allowed"),
        );
    }

    let id = Uuid::new_v4();
    state
        .sent
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(SentEmail { id, request });

    Json(SendEmailResponse { id }).into_response()
}

fn is_rejected(recipient: &str) -> bool {
    let address = recipient
        .rsplit_once('<')
        .map_or(recipient, |(_, address)| address.trim_end_matches('>'));
    address
        .split_once('@')
        .is_some_and(|(local, _)| local == REJECTED_LOCAL_PART)
}

fn error_response(status: StatusCode, name: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "statusCode": status.as_u16(),
            "name": name,
            "message": message,
        })),
    )
        .into_response()
}
