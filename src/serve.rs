//! Static file server for the output tree.
//!
//! The request loop runs on the calling thread and polls a [`ShutdownToken`].
//! Once the token is cancelled the server stops accepting, answers requests
//! that were already queued, then closes the listener.

use std::fs::File;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tiny_http::{Header, Request, Response, Server};

use crate::error::{Error, Result};

/// How long one wait for a request may block before the token is checked again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Cloneable cancellation flag shared between the server and whoever stops it.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken(Arc<AtomicBool>);

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// HTTP server bound to one output directory.
pub struct FileServer {
    server: Server,
    root: PathBuf,
}

impl FileServer {
    /// Binds a listener on `addr` serving files below `root`.
    pub fn bind<P: AsRef<Path>>(root: P, addr: SocketAddr) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| Error::ServeError(format!("cannot bind {addr}: {e}")))?;
        Ok(Self { server, root: root.as_ref().to_path_buf() })
    }

    /// Address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves requests until `token` is cancelled.
    pub fn run(self, token: &ShutdownToken) -> Result<()> {
        while !token.is_cancelled() {
            match self.server.recv_timeout(POLL_INTERVAL) {
                Ok(Some(request)) => self.respond(request),
                Ok(None) => {}
                Err(e) => return Err(Error::ServeError(e.to_string())),
            }
        }

        // Drain what was accepted before the shutdown.
        while let Ok(Some(request)) = self.server.try_recv() {
            self.respond(request);
        }
        info!("Closed server");
        Ok(())
    }

    fn respond(&self, request: Request) {
        let url = request.url().to_string();
        if let Err(e) = self.handle_request(request) {
            warn!("Request '{}' failed: {}", url, e);
        }
    }

    /// Resolution order: exact file, directory `index.html`, 404.
    fn handle_request(&self, request: Request) -> std::io::Result<()> {
        let decoded = urlencoding::decode(request.url())
            .map(std::borrow::Cow::into_owned)
            .unwrap_or_default();
        let request_path = decoded.split('?').next().unwrap_or_default().trim_matches('/');
        debug!("{} /{}", request.method(), request_path);

        let relative = Path::new(request_path);
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return request.respond(Response::from_string("403 Forbidden").with_status_code(403));
        }

        let mut local_path = self.root.join(relative);
        if local_path.is_dir() {
            local_path = local_path.join("index.html");
        }
        if !local_path.is_file() {
            return request.respond(Response::from_string("404 Not Found").with_status_code(404));
        }

        let mut response = Response::from_file(File::open(&local_path)?);
        if let Ok(header) = Header::from_bytes("Content-Type", guess_content_type(&local_path)) {
            response = response.with_header(header);
        }
        request.respond(response)
    }
}

/// Guesses the MIME type from the file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Serves `root` on every interface at `port` until Ctrl+C.
pub fn serve_site<P: AsRef<Path>>(root: P, port: u16) -> Result<()> {
    let server = FileServer::bind(root, SocketAddr::from(([0, 0, 0, 0], port)))?;
    let token = ShutdownToken::new();

    let signal_token = token.clone();
    ctrlc::set_handler(move || signal_token.cancel())
        .map_err(|e| Error::ServeError(format!("cannot install Ctrl+C handler: {e}")))?;

    info!("Started server at http://localhost:{}/", port);
    server.run(&token)
}
