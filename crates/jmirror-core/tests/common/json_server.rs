//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned bodies keyed by request target (path plus query); routes can
//! be added after start so bodies may embed the server's own URL. Unknown
//! targets get 404. Every request target is logged so tests can assert on
//! what was fetched.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: String,
}

type Routes = Arc<Mutex<HashMap<String, Route>>>;

pub struct JsonServer {
    pub base: String,
    routes: Routes,
    hits: Arc<Mutex<Vec<String>>>,
}

impl JsonServer {
    /// URL for `target` on this server, e.g. `url("/feed?page=1")`.
    pub fn url(&self, target: &str) -> String {
        format!("{}{}", self.base, target)
    }

    /// Serves `body` with `status` for `target` (path plus query).
    pub fn route(&self, target: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            target.to_string(),
            Route {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn clear_hits(&self) {
        self.hits.lock().unwrap().clear();
    }
}

/// Starts a server in a background thread with no routes. Returns once bound;
/// the server runs until the process exits.
pub fn start() -> JsonServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Routes = Arc::new(Mutex::new(HashMap::new()));
    let hits = Arc::new(Mutex::new(Vec::new()));
    let routes_srv = Arc::clone(&routes);
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes_srv);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    JsonServer {
        base: format!("http://127.0.0.1:{}", port),
        routes,
        hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &Mutex<HashMap<String, Route>>,
    hits: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.lock().unwrap().push(target.clone());

    let route = routes.lock().unwrap().get(&target).cloned();
    let (status, body) = match &route {
        Some(r) => (r.status, r.body.as_str()),
        None => (404, "not found"),
    };
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
