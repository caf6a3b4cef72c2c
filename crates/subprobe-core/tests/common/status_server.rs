//! Minimal plain-HTTP/1.1 server answering HEAD with a fixed status, for integration tests.
//!
//! Only speaks cleartext HTTP, so an `https://` probe against it fails the TLS
//! handshake. Records the method and User-Agent of every request it could parse.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct StatusServerOptions {
    /// Status returned for `/`.
    pub status: u16,
    /// Sleep this long after accepting, before reading or answering.
    pub delay: Option<Duration>,
    /// If set, `/` answers 302 -> `/final`, and `/final` answers this status.
    pub redirect_final_status: Option<u16>,
}

impl Default for StatusServerOptions {
    fn default() -> Self {
        Self {
            status: 200,
            delay: None,
            redirect_final_status: None,
        }
    }
}

/// Method and `User-Agent` value (if any) of one parsed request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub user_agent: Option<String>,
}

pub struct StatusServer {
    /// `127.0.0.1:<port>`, usable as a hostname input line.
    pub host: String,
    requests: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StatusServer {
    /// Methods of all parsed requests so far.
    pub fn methods(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.method).collect()
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn head_count(&self) -> usize {
        self.methods().iter().filter(|m| m.as_str() == "HEAD").count()
    }
}

/// Starts a server answering every request with `status`.
pub fn start(status: u16) -> StatusServer {
    start_with_options(StatusServerOptions {
        status,
        ..StatusServerOptions::default()
    })
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start_with_options(opts: StatusServerOptions) -> StatusServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, opts, &recorded));
        }
    });
    StatusServer {
        host: format!("127.0.0.1:{}", port),
        requests,
    }
}

/// A bound listener that never accepts: connections sit in the backlog (or
/// wait on SYN retries once it is full) and never get an answer. Keep the
/// listener alive for as long as the host is probed.
pub fn never_answering() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    (listener, format!("127.0.0.1:{}", port))
}

/// A loopback `host:port` with nothing listening, so connections are refused.
pub fn refused_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, opts: StatusServerOptions, requests: &Mutex<Vec<SeenRequest>>) {
    if let Some(delay) = opts.delay {
        thread::sleep(delay);
    }
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    // TLS ClientHello and other binary noise: just hang up.
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut lines = request.lines();
    let mut request_line = lines.next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("").to_string();
    let path = request_line.next().unwrap_or("/").to_string();
    let user_agent = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, value)| value.trim().to_string());
    requests.lock().unwrap().push(SeenRequest { method, user_agent });

    let response = match opts.redirect_final_status {
        Some(final_status) if path == "/final" => status_response(final_status, ""),
        Some(_) => status_response(302, "Location: /final\r\n"),
        None => status_response(opts.status, ""),
    };
    let _ = stream.write_all(response.as_bytes());
}

fn status_response(status: u16, extra_headers: &str) -> String {
    let reason = match status {
        200 => "OK",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n{}\r\n",
        status, reason, extra_headers
    )
}
