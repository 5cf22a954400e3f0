//! Canned local HTTP server for client tests.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request lines (`GET /path?query HTTP/1.1`) seen by a [`serve_recording`] server.
pub(crate) type SeenRequests = Arc<Mutex<Vec<String>>>;

/// Serves the same response to every connection on an ephemeral local port and
/// returns the base URL (with trailing slash).
pub(crate) async fn serve_fixed(status: &str, content_type: &str, body: &str) -> String {
    serve_recording(status, content_type, body).await.0
}

/// Like [`serve_fixed`], also recording the request line of every call.
pub(crate) async fn serve_recording(status: &str, content_type: &str, body: &str) -> (String, SeenRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    let seen: SeenRequests = Arc::default();
    let log = Arc::clone(&seen);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            let response = response.clone();
            let log = Arc::clone(&log);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = Vec::new();
                // Read until the end of the request headers.
                while !read.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => read.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&read);
                if let Some(line) = head.lines().next() {
                    log.lock().unwrap().push(line.to_string());
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}/", addr), seen)
}
