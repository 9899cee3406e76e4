//! Data access for list pages: the [`Backend`] trait and its HTTP implementation

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{Account, FileCategory, FileRecord},
    routes,
    services::session::SessionInfo,
    session::{Session, SessionOutcome},
};

use super::resource::Resource;

/// Remote operations a list page needs for one entity
#[async_trait]
pub trait Backend<R: Resource>: Send + Sync {
    /// Every record, in the server's declared order
    async fn list(&self) -> AppResult<Vec<R>>;
    async fn create(&self, data: &R::Create) -> AppResult<R>;
    /// Apply a field-level change and return the stored row
    async fn update(&self, id: &R::Id, patch: &R::Patch) -> AppResult<R>;
    async fn delete(&self, id: &R::Id) -> AppResult<()>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
    account: Account,
}

/// HTTP client for the Elban API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    /// Server origin, e.g. `http://localhost:8080`
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn sign_out(&mut self) {
        self.token = None;
    }

    /// Sign in and keep the issued token for later calls
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<Account> {
        let reply: LoginReply = self
            .send_json(self.request(Method::POST, "/auth/login").json(&LoginBody { email, password }))
            .await?;
        self.token = Some(reply.token);
        Ok(reply.account)
    }

    /// Ask the server who the current token belongs to
    pub async fn session_info(&self) -> AppResult<SessionInfo> {
        self.send_json(self.request(Method::GET, "/auth/session")).await
    }

    /// Resolve the session for page guarding. A missing or rejected token is
    /// unauthenticated; any other failure keeps the user signed in with no role.
    pub async fn resolve_session(&self) -> SessionOutcome {
        if self.token.is_none() {
            return SessionOutcome::Unauthenticated;
        }

        match self.session_info().await {
            Ok(info) => SessionOutcome::Resolved(Session {
                email: info.email,
                role: info.role,
            }),
            Err(AppError::Authentication(_)) => SessionOutcome::Unauthenticated,
            Err(e) => {
                tracing::warn!("Session lookup failed: {}", e);
                SessionOutcome::Resolved(Session {
                    email: None,
                    role: String::new(),
                })
            }
        }
    }

    /// Upload a document into the archive
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        category: FileCategory,
        notes: Option<&str>,
    ) -> AppResult<FileRecord> {
        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
            )
            .text("category", category.to_string());
        if let Some(notes) = notes {
            form = form.text("notes", notes.to_string());
        }

        self.send_json(self.request(Method::POST, "/arsip/upload").multipart(form))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, routes::API_PREFIX, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request failed: {}", e)))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid response body: {}", e)))
    }
}

#[async_trait]
impl<R: Resource> Backend<R> for ApiClient {
    async fn list(&self) -> AppResult<Vec<R>> {
        self.send_json(self.request(Method::GET, R::PATH)).await
    }

    async fn create(&self, data: &R::Create) -> AppResult<R> {
        self.send_json(self.request(Method::POST, &R::create_path()).json(data))
            .await
    }

    async fn update(&self, id: &R::Id, patch: &R::Patch) -> AppResult<R> {
        self.send_json(self.request(Method::PUT, &R::patch_path(id, patch)).json(patch))
            .await
    }

    async fn delete(&self, id: &R::Id) -> AppResult<()> {
        self.send(self.request(Method::DELETE, &R::delete_path(id))).await?;
        Ok(())
    }
}

/// Turn a non-success response back into the server's error
async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let body: Option<ErrorResponse> = response.json().await.ok();
    let message = body
        .as_ref()
        .map(|b| b.message.clone())
        .unwrap_or_else(|| status.to_string());

    map_status(status, message, body.and_then(|b| b.redirect))
}

fn map_status(status: StatusCode, message: String, redirect: Option<String>) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Authentication(message),
        StatusCode::FORBIDDEN => match redirect {
            Some(redirect) => AppError::RouteDenied { redirect },
            None => AppError::Authorization(message),
        },
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        StatusCode::BAD_REQUEST => AppError::Validation(message),
        _ => AppError::Upstream(format!("{}: {}", status, message)),
    }
}
