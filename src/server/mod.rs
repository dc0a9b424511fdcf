//! HTTP upload endpoint
//!
//! Thin glue around the scanner: one route, `POST /file-upload`, that
//! streams the request body through the frame counter and answers with the
//! count as JSON. Every request runs a fresh scan session, so concurrent
//! uploads cannot influence each other's counts.
//!
//! The scanner itself knows nothing about HTTP; everything status-shaped
//! lives in this module.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use serde::Serialize;
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{debug, info, warn};

use crate::mp3::scanner::count_frames;

/// Upload route served by [`HttpServer`].
pub const UPLOAD_PATH: &str = "/file-upload";

/// Successful count response body.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    #[serde(rename = "frameCount")]
    pub frame_count: usize,
}

/// Request failures, mapped onto HTTP status codes.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid Content-Type. Expected audio/mpeg")]
    UnsupportedMediaType,
    #[error("Failed to process MP3 file")]
    Body(#[from] io::Error),
}

impl RequestError {
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::UnsupportedMediaType => 415,
            RequestError::Body(_) => 500,
        }
    }
}

/// The frame-count HTTP server.
pub struct HttpServer {
    server: Arc<Server>,
}

impl HttpServer {
    /// Bind to `addr` without accepting requests yet.
    pub fn bind(addr: &str) -> io::Result<Self> {
        let server = Server::http(addr).map_err(io::Error::other)?;
        Ok(Self {
            server: Arc::new(server),
        })
    }

    /// Address the server actually bound, useful with a `:0` port.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests forever on `workers` threads (at least one).
    pub fn run(&self, workers: usize) {
        info!(workers, "serving requests");
        let mut handles = Vec::new();
        for _ in 1..workers.max(1) {
            let server = Arc::clone(&self.server);
            handles.push(thread::spawn(move || serve_loop(&server)));
        }
        serve_loop(&self.server);
        for handle in handles {
            let _ = handle.join();
        }
    }
}

fn serve_loop(server: &Server) {
    for request in server.incoming_requests() {
        handle(request);
    }
}

fn handle(mut request: Request) {
    debug!(method = %request.method(), url = request.url(), "request");

    if *request.method() != Method::Post || request.url() != UPLOAD_PATH {
        respond(
            request,
            Response::from_string("Not Found").with_status_code(404),
        );
        return;
    }

    match count_upload(&mut request) {
        Ok(frame_count) => match serde_json::to_string(&CountResponse { frame_count }) {
            Ok(body) => respond(request, json_response(body, 200)),
            Err(e) => {
                warn!(error = %e, "response serialization failed");
                respond(
                    request,
                    Response::from_string("Internal Server Error").with_status_code(500),
                );
            }
        },
        Err(e) => {
            warn!(status = e.status_code(), error = ?e, "request rejected");
            let body = serde_json::json!({
                "statusCode": e.status_code(),
                "message": e.to_string(),
            })
            .to_string();
            respond(request, json_response(body, e.status_code()));
        }
    }
}

/// Content-type gate plus body scan. The scan session is constructed per
/// call; nothing survives between requests.
fn count_upload(request: &mut Request) -> Result<usize, RequestError> {
    if !has_mpeg_content_type(request) {
        return Err(RequestError::UnsupportedMediaType);
    }
    count_frames(request.as_reader()).map_err(RequestError::Body)
}

fn has_mpeg_content_type(request: &Request) -> bool {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .is_some_and(|h| h.value.as_str().to_lowercase().starts_with("audio/mpeg"))
}

fn json_response(body: String, status: u16) -> Response<io::Cursor<Vec<u8>>> {
    let mut response = Response::from_string(body).with_status_code(status);
    if let Ok(content_type) =
        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
    {
        response = response.with_header(content_type);
    }
    response
}

fn respond<R: io::Read>(request: Request, response: Response<R>) {
    if let Err(e) = request.respond(response) {
        warn!(error = %e, "failed to send response");
    }
}
