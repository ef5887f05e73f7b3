//! Test harness for driving the storefront router in-process.
//!
//! Each [`TestApp`] owns a private in-memory database, a memory session
//! store and a temporary directory holding the order ledger. Requests go
//! through `tower::ServiceExt::oneshot`; the session cookie from the last
//! `Set-Cookie` is replayed on the next request, like a browser would.
//!
//! ```rust,ignore
//! let mut app = TestApp::new().await;
//! app.register_and_login("anna").await;
//! let res = app.get("/cart").await;
//! assert_eq!(res.status, StatusCode::OK);
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, StatusCode, header},
};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use nutribook_core::Order;
use nutribook_storefront::{app, config::StorefrontConfig, db, state::AppState};

/// High-entropy secret used to sign test session cookies.
const TEST_SESSION_SECRET: &str = "q7Vn2Lx9Rb4Tz1Wk8Hs5Jd3Mf6Gp0Yc-Ue!Ao";

/// A captured response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Assert a redirect and return its target.
    #[must_use]
    pub fn redirect_target(&self) -> &str {
        assert!(
            self.status.is_redirection(),
            "expected redirect, got {}",
            self.status
        );
        self.location.as_deref().unwrap()
    }
}

/// One browser session against a storefront.
pub struct TestApp {
    router: Router,
    pool: SqlitePool,
    orders_path: PathBuf,
    cookie: Option<String>,
    _dir: Arc<TempDir>,
}

impl TestApp {
    /// Start a fresh storefront with an empty database and ledger.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let orders_path = dir.path().join("orders.json");

        let config = StorefrontConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from(TEST_SESSION_SECRET),
            orders_path: orders_path.clone(),
            static_dir: dir.path().to_path_buf(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let pool = db::create_memory_pool().await.unwrap();
        let state = AppState::new(config, pool.clone());
        let router = app(state, MemoryStore::default());

        Self {
            router,
            pool,
            orders_path,
            cookie: None,
            _dir: Arc::new(dir),
        }
    }

    /// A second browser (no cookie) against the same storefront.
    #[must_use]
    pub fn fresh_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            pool: self.pool.clone(),
            orders_path: self.orders_path.clone(),
            cookie: None,
            _dir: Arc::clone(&self._dir),
        }
    }

    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            // Keep only `name=value`; attributes are not sent back.
            self.cookie = set_cookie.split(';').next().map(str::to_string);
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::get(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    pub async fn register(&mut self, username: &str, password: &str) -> TestResponse {
        let email = format!("{username}@example.com");
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("email", &email),
                ("password", password),
            ],
        )
        .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Register `username` with a valid password and log in.
    pub async fn register_and_login(&mut self, username: &str) {
        let res = self.register(username, "correct-horse-battery").await;
        assert_eq!(res.redirect_target(), "/login");
        let res = self.login(username, "correct-horse-battery").await;
        assert_eq!(res.redirect_target(), "/shop");
    }

    /// Records currently in the ledger file (empty when absent).
    #[must_use]
    pub fn ledger(&self) -> Vec<Order> {
        std::fs::read(&self.orders_path)
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn ledger_exists(&self) -> bool {
        self.orders_path.exists()
    }

    /// Number of rows in a table.
    pub async fn count(&self, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let (count,): (i64,) = sqlx::query_as(&sql)
            .fetch_one(&self.pool)
            .await
            .unwrap();
        count
    }
}

/// `application/x-www-form-urlencoded` body.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
