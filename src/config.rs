use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}
impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON document holding the color records.
    pub path: PathBuf,
}
impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("colors.json"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Root of the static site. `/assets/*` maps to `<static_dir>/assets`.
    pub static_dir: PathBuf,
    /// Page served at `/`, relative to `static_dir`.
    pub index_file: String,
}
impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            index_file: "index.html".into(),
        }
    }
}

impl AssetsConfig {
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
    pub fn assets_dir(&self) -> PathBuf {
        self.static_dir.join("assets")
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `COLOR_SERVER_LOG` is unset.
    pub filter: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub catalog: CatalogConfig,
    pub assets: AssetsConfig,
    pub log: LogConfig,
}

impl ServerConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(ron::from_str(&data)?)
    }

    /// Merges RON files in order; keys in later files override earlier ones.
    /// Returns the config, the paths that were applied, and per-file errors.
    /// Unreadable or unparsable layers are skipped, never fatal.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<ServerConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!("failed to deserialize merged config; using defaults: {e}"));
                    (ServerConfig::default(), used, errors)
                }
            },
            None => (ServerConfig::default(), used, errors),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Non-fatal sanity checks. Each entry is a human readable warning.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.server.host.trim().is_empty() {
            w.push("server.host is empty".into());
        }
        if self.server.port == 0 {
            w.push("server.port is 0; the OS will pick an ephemeral port".into());
        }
        if self.catalog.path.as_os_str().is_empty() {
            w.push("catalog.path is empty".into());
        }
        if !self.assets.static_dir.is_dir() {
            w.push(format!(
                "assets.static_dir {} is not a directory; static routes will 404",
                self.assets.static_dir.display()
            ));
        } else if !self.assets.index_path().is_file() {
            w.push(format!(
                "assets.index_file {} not found",
                self.assets.index_path().display()
            ));
        }
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.log.filter) {
            w.push(format!("log.filter {:?} is invalid ({e}); falling back to info", self.log.filter));
        }
        w
    }
}
