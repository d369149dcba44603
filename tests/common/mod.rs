#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing;
use axum::Router;
use bookshop_metrics::build_router;
use bookshop_metrics::models::book::Book;
use bookshop_metrics::services::catalog::{BookCatalog, InMemoryBookCatalog};
use bookshop_metrics::services::metrics::MetricsService;
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceExt;

pub const TOLKIEN: &str = "Tolkien";
pub const LEWIS: &str = "C.S. Lewis";

pub fn book(id: i64, name: &str, author: &str, units_sold: u64, price: u64) -> Book {
    Book {
        id,
        name: name.to_string(),
        author: author.to_string(),
        units_sold,
        price,
    }
}

/// Three Tolkien books at 20 followed by one Lewis book at 15.
pub fn sample_books() -> Vec<Book> {
    vec![
        book(1, "The Fellowship of the Ring", TOLKIEN, 50_000_000, 20),
        book(2, "The Two Towers", TOLKIEN, 30_000_000, 20),
        book(3, "The Return of the King", TOLKIEN, 50_000_000, 20),
        book(4, "The Lion, the Witch and the Wardrobe", LEWIS, 85_000_000, 15),
    ]
}

pub fn app_with(catalog: impl BookCatalog + Send + Sync + 'static) -> Router {
    build_router(MetricsService::new(Arc::new(catalog)))
}

pub fn app_with_books(books: Vec<Book>) -> Router {
    app_with(InMemoryBookCatalog::new(books))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve `body` with `status` at `/books` on an ephemeral port and return the URL.
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
    let upstream = Router::new().route(
        "/books",
        routing::get(move || async move {
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );
    serve(upstream).await
}

/// Upstream that accepts the request but answers only after `delay`.
pub async fn spawn_slow_upstream(delay: Duration) -> String {
    let upstream = Router::new().route(
        "/books",
        routing::get(move || async move {
            tokio::time::sleep(delay).await;
            "[]"
        }),
    );
    serve(upstream).await
}

/// Upstream that reads one request and never answers. The receiver fires
/// once the client closes the connection.
pub async fn spawn_stalled_upstream() -> (String, oneshot::Receiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
        let _ = closed_tx.send(());
    });

    (format!("http://{}/books", addr), closed_rx)
}

/// A URL on which nothing is listening.
pub async fn closed_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/books", addr)
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/books", addr)
}
