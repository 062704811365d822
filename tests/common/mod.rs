#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shorty::application::services::PasswordHasher;
use shorty::domain::click_event::ClickEvent;
use shorty::domain::codec;
use shorty::routes::build_router;
use shorty::state::AppState;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const TEST_SECRET: &str = "test-password-secret";
pub const TEST_PASSWORD: &str = "correct-horse";

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with(pool, 100, None)
}

pub fn create_test_state_with(
    pool: PgPool,
    queue_capacity: usize,
    base_url: Option<&str>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(queue_capacity);

    let state = AppState::new(
        Arc::new(pool),
        tx,
        TEST_SECRET.to_string(),
        base_url.map(str::to_string),
    );

    (state, rx)
}

/// Full router with a fixed peer address, as served in production minus
/// path normalization.
pub fn make_server(state: AppState) -> TestServer {
    let app = build_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Inserts a user whose password is [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, email: &str) -> i64 {
    let hash = PasswordHasher::new(TEST_SECRET.to_string()).hash(email, TEST_PASSWORD);

    sqlx::query_scalar("INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(hash)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a link the way the service does: reserve the id, then write it
/// together with its code. Returns `(id, code)`.
pub async fn create_test_link(pool: &PgPool, user_id: i64, url: &str) -> (i64, String) {
    let id: i64 = sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('links', 'id'))")
        .fetch_one(pool)
        .await
        .unwrap();
    let code = codec::encode(id);

    sqlx::query("INSERT INTO links (id, user_id, code, long_url) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(user_id)
        .bind(&code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();

    (id, code)
}

pub async fn create_test_click(pool: &PgPool, link_id: i64) {
    sqlx::query("INSERT INTO clicks (link_id, ip) VALUES ($1, '127.0.0.1')")
        .bind(link_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_clicks(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// `Authorization` header value for the given credentials.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
