//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use atelier_cache::FileStore;
use atelier_commerce::{CartStore, StoreConfig};
use tracing::debug;

use crate::config::CONFIG_FILE_NAMES;
use crate::output::Output;

/// Default location of the storage file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = ".atelier/storage.json";

/// Execution context for CLI commands.
pub struct Context {
    /// Store configuration.
    pub config: StoreConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Storage file backing the cart.
    pub store_path: PathBuf,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, store_path: &str, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve_path(&cwd, path)),
            // Try to find config in current directory or parent directories
            None => find_config(&cwd),
        };

        let config = match &config_path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                StoreConfig::load(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?
            }
            None => StoreConfig::default(),
        };

        let store_path = resolve_path(&cwd, store_path);

        Ok(Self {
            config,
            config_path,
            store_path,
            output,
            cwd,
        })
    }

    /// Open the cart store backed by the storage file and restore its contents.
    pub fn open_store(&self) -> Result<CartStore<FileStore>> {
        let backend = FileStore::new(&self.store_path);
        CartStore::open(backend, self.config.clone())
            .with_context(|| format!("Failed to open cart store: {}", self.store_path.display()))
    }
}

/// Find a config file in the directory tree, nearest first.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("atelier.toml"), "currency = \"EUR\"\n").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("atelier.toml")));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("atelier.toml"), "").unwrap();
        std::fs::write(nested.join("atelier.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("atelier.json")));
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(
            resolve_path(cwd, DEFAULT_STORE_PATH),
            PathBuf::from("/srv/shop/.atelier/storage.json")
        );
        assert_eq!(resolve_path(cwd, "/tmp/cart.json"), PathBuf::from("/tmp/cart.json"));
    }
}
