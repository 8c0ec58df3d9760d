//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, REFERER, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use mediashare_api::{AppState, build_app};
use mediashare_auth::credential::CredentialStore;
use mediashare_core::config::AppConfig;
use mediashare_storage::{FileGateway, LocalStorageProvider};

const BOUNDARY: &str = "mediashare-test-boundary";

/// Test application context.
///
/// Each instance owns a temporary directory holding the credential file and
/// the upload directory, plus a cookie jar that behaves like one browser.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Credential store shared with the router
    pub credentials: Arc<CredentialStore>,
    /// Scratch space removed on drop
    pub dir: TempDir,
    jar: Mutex<BTreeMap<String, String>>,
}

impl TestApp {
    /// Create a new test application seeded with `admin` / `password`.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.auth.users_file = dir.path().join("users.json").to_string_lossy().to_string();
        config.storage.upload_dir = dir.path().join("uploads").to_string_lossy().to_string();
        config.session.secret = "integration-test-secret".to_string();

        let provider = LocalStorageProvider::new(&config.storage.upload_dir)
            .await
            .expect("Failed to init storage");
        let files = Arc::new(FileGateway::new(Arc::new(provider)));

        let credentials = Arc::new(
            CredentialStore::open(
                &config.auth.users_file,
                &config.auth.admin_username,
                &config.auth.seed_admin_password,
            )
            .await
            .expect("Failed to open credential store"),
        );

        let state = AppState::new(config.clone(), Arc::clone(&credentials), files)
            .expect("Failed to build state");
        let router = build_app(state);

        Self {
            router,
            config,
            credentials,
            dir,
            jar: Mutex::new(BTreeMap::new()),
        }
    }

    /// Path of the upload directory.
    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.upload_dir)
    }

    /// Forget every cookie, as if a new browser connected.
    pub fn clear_cookies(&self) {
        self.jar.lock().unwrap().clear();
    }

    /// Send a request with the jar's cookies and record any `Set-Cookie`.
    pub async fn send(&self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let cookie_header = {
            let jar = self.jar.lock().unwrap();
            jar.iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ")
        };

        let builder = if cookie_header.is_empty() {
            builder
        } else {
            builder.header(COOKIE, cookie_header)
        };
        let req = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        self.store_cookies(&headers);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body_bytes).to_string(),
        }
    }

    fn store_cookies(&self, headers: &HeaderMap) {
        let mut jar = self.jar.lock().unwrap();
        for value in headers.get_all(SET_COOKIE) {
            let raw = value.to_str().expect("Non-ASCII Set-Cookie");
            let pair = raw.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                if value.is_empty() {
                    jar.remove(name.trim());
                } else {
                    jar.insert(name.trim().to_string(), value.to_string());
                }
            }
        }
    }

    /// GET a path.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Request::builder().method("GET").uri(path), Body::empty())
            .await
    }

    /// POST an urlencoded form.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    /// POST a multipart upload with a single `file` field.
    pub async fn upload(&self, filename: &str, content: &[u8]) -> TestResponse {
        self.upload_with_referer(filename, content, None).await
    }

    /// Same as [`TestApp::upload`] with an explicit `Referer` header.
    pub async fn upload_with_referer(
        &self,
        filename: &str,
        content: &[u8],
        referer: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        self.post_multipart(body, referer).await
    }

    /// POST a multipart body that carries no `file` field.
    pub async fn upload_without_file(&self) -> TestResponse {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
        );
        self.post_multipart(body.into_bytes(), None).await
    }

    async fn post_multipart(&self, body: Vec<u8>, referer: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(referer) = referer {
            builder = builder.header(REFERER, referer);
        }
        self.send(builder, Body::from(body)).await
    }

    /// POST /delete/{name}, with an optional `Referer`.
    pub async fn delete(&self, encoded_name: &str, referer: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(format!("/delete/{encoded_name}"));
        if let Some(referer) = referer {
            builder = builder.header(REFERER, referer);
        }
        self.send(builder, Body::empty()).await
    }

    /// Log in and assert the redirect to `/`.
    pub async fn login(&self, username: &str, password: &str) {
        let response = self
            .post_form("/login", &[("username", username), ("password", password)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "login failed: {}", response.body);
        assert_eq!(response.location(), Some("/"));
    }

    /// Log in as the seeded administrator.
    pub async fn login_admin(&self) {
        self.login("admin", "password").await;
    }

    /// Register through the signup form and assert success.
    pub async fn signup(&self, username: &str, password: &str) {
        let response = self
            .post_form(
                "/signup",
                &[
                    ("username", username),
                    ("password", password),
                    ("confirm_password", password),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "signup failed: {}", response.body);
        assert_eq!(response.location(), Some("/login"));
    }
}

fn form_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body decoded as UTF-8 (lossy)
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Assert a 303 redirect to `target`.
    pub fn assert_redirect(&self, target: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location(), Some(target));
    }
}
