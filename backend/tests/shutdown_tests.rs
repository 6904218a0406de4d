//! Graceful shutdown: in-flight requests are drained within the grace
//! period, and serving fails once the grace period is exceeded.

#![cfg(feature = "http-server")]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{routing::get, Router};
use student_server::http::{serve_with_shutdown, ServeError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Notify};

/// Router with one `/work` route that signals `started` and then waits
/// `delay` (forever when `None`) before answering.
fn work_router(started: Arc<Notify>, delay: Option<Duration>) -> Router {
    Router::new().route(
        "/work",
        get(move || {
            let started = started.clone();
            async move {
                started.notify_one();
                match delay {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => std::future::pending::<()>().await,
                }
                "done"
            }
        }),
    )
}

async fn start(
    app: Router,
    grace: Duration,
) -> (
    SocketAddr,
    oneshot::Sender<()>,
    tokio::task::JoinHandle<Result<(), ServeError>>,
) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        let _ = stop_rx.await;
    };
    let handle = tokio::spawn(serve_with_shutdown(listener, app, shutdown, grace));
    (addr, stop_tx, handle)
}

async fn open_request(addr: SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /work HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    stream
}

#[tokio::test]
async fn test_idle_server_stops_cleanly() {
    let app = work_router(Arc::new(Notify::new()), None);
    let (_, stop, handle) = start(app, Duration::from_secs(5)).await;

    stop.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_in_flight_request_is_drained() {
    let started = Arc::new(Notify::new());
    let app = work_router(started.clone(), Some(Duration::from_millis(200)));
    let (addr, stop, handle) = start(app, Duration::from_secs(5)).await;

    let mut stream = open_request(addr).await;
    started.notified().await;
    stop.send(()).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("done"));

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_stuck_request_exceeds_grace_period() {
    let started = Arc::new(Notify::new());
    let app = work_router(started.clone(), None);
    let grace = Duration::from_millis(300);
    let (addr, stop, handle) = start(app, grace).await;

    let _stream = open_request(addr).await;
    started.notified().await;
    let stopped_at = Instant::now();
    stop.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(result, Err(ServeError::ShutdownTimeout(d)) if d == grace));
    assert!(stopped_at.elapsed() >= grace);
}
