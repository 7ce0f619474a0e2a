use anyhow::Context;
use clap::Parser;
use color_server::{logging, router, Catalog, ServerConfig};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Serve a fixed catalog of named colors and their swatches", version)]
struct Args {
    /// RON config layers, merged in order. Missing files fall back to defaults.
    #[arg(long = "config", default_value = "config/server.ron")]
    configs: Vec<PathBuf>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Colors JSON document.
    #[arg(long)]
    colors: Option<PathBuf>,
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Log filter used when COLOR_SERVER_LOG is unset (e.g. `debug`, `color_server=trace`).
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn apply(self, cfg: &mut ServerConfig) {
        if let Some(host) = self.host {
            cfg.server.host = host;
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(colors) = self.colors {
            cfg.catalog.path = colors;
        }
        if let Some(dir) = self.static_dir {
            cfg.assets.static_dir = dir;
        }
        if let Some(filter) = self.log {
            cfg.log.filter = filter;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (mut cfg, used, errors) = ServerConfig::load_layered(&args.configs);
    args.apply(&mut cfg);

    logging::init(&cfg.log.filter);
    if !used.is_empty() {
        info!("config layers: {}", used.join(", "));
    }
    for e in &errors {
        warn!("config: {e}");
    }
    for w in cfg.validate() {
        warn!("config: {w}");
    }

    // A catalog that cannot be loaded aborts startup; there is no fallback palette.
    let catalog = Catalog::load(&cfg.catalog.path)
        .with_context(|| format!("load colors from {}", cfg.catalog.path.display()))?;

    let app = router(Arc::new(catalog), &cfg.assets);
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    color_server::server::serve(listener, app).await?;
    Ok(())
}
