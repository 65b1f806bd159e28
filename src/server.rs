//! Request routing and the HTTP accept loop

use crate::config::AssetConfig;
use crate::core::fs::{AssetFs, DirFs};
use crate::core::path as core_path;
use crate::core::registry::Registry;
use crate::dashboard::Dashboard;
use crate::error::ServerResult;
use crate::static_files::{bad_request, method_not_allowed, not_found, serve_asset, HttpResponse};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::{Method, Request};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// URL prefix the static asset handler is mounted at
pub const ASSET_ROUTE: &str = "/assets";

/// Text endpoint polled by the dashboard scripts
pub const AJAX_ROUTE: &str = "/script/ajax.php";

/// Everything a request needs, built once at startup
pub struct App {
    dashboard: Dashboard,
    assets: DirFs<AssetFs>,
}

impl App {
    /// Select the asset backend, load the index page, and mount the asset
    /// subtree. Fails if the index page cannot be loaded.
    pub fn new(config: &AssetConfig, registry: Arc<Registry>) -> ServerResult<Self> {
        let fs = AssetFs::from_config(config, registry);
        let dashboard = Dashboard::load(&fs)?;
        let assets = fs.dir(&config.root_prefix);
        info!(
            "Mounted {} at {} (local={})",
            assets.prefix(),
            ASSET_ROUTE,
            assets.base().is_local()
        );

        Ok(App { dashboard, assets })
    }

    pub fn handle<B>(&self, req: &Request<B>) -> HttpResponse {
        let method = req.method();
        let raw_path = req.uri().path();
        debug!("{} {}", method, raw_path);

        let Some(decoded) = decode_path(raw_path) else {
            debug!("Rejecting undecodable path {}", raw_path);
            return bad_request();
        };
        let path: &str = &decoded;

        if let Some(rest) = strip_route(path, ASSET_ROUTE) {
            // Cleaned here so `..` in a request cannot climb out of the mount
            let name = core_path::normalize(rest);
            return serve_asset(&self.assets, method, req.headers(), &name);
        }

        if method != Method::GET && method != Method::HEAD {
            return method_not_allowed();
        }

        match path {
            "/" => self.dashboard.index(),
            AJAX_ROUTE => self.dashboard.ajax(req.uri().query()),
            _ => not_found(),
        }
    }
}

/// Percent-decoded request path, `None` if it is not valid UTF-8
fn decode_path(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

/// `path` relative to `route`, if it lies under it
fn strip_route<'a>(path: &'a str, route: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(route)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Accept connections on `listener` until `shutdown` resolves
pub async fn serve<S>(app: Arc<App>, listener: TcpListener, shutdown: S) -> ServerResult<()>
where
    S: Future<Output = ()>,
{
    let http_server = ConnBuilder::new(TokioExecutor::new());
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((socket, peer)) => {
                        let app = app.clone();
                        let http_server = http_server.clone();
                        tokio::spawn(async move {
                            let service = service_fn(move |req: Request<Incoming>| {
                                let app = app.clone();
                                async move { Ok::<_, Infallible>(app.handle(&req)) }
                            });
                            if let Err(e) = http_server
                                .serve_connection(TokioIo::new(socket), service)
                                .await
                            {
                                warn!("Connection error from {}: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown requested, no longer accepting connections");
                break;
            }
        }
    }

    Ok(())
}
