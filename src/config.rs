//! Process configuration from environment variables.
//!
//! Every value has a default so the service starts with an empty
//! environment. `.env` files are loaded by `main` before this runs.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BLOB_DIR: &str = "./blobs";
pub const DEFAULT_BLOB_PUBLIC_BASE_URL: &str = "/blobs";
pub const DEFAULT_STATIC_DIR: &str = "./public";
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 2048;

/// Where blobs live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobBackend {
    /// Files under `BLOB_DIR`, served back at `BLOB_PUBLIC_BASE_URL`.
    Fs,
    /// Process memory; lost on restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub blob_backend: BlobBackend,
    pub blob_dir: PathBuf,
    pub blob_public_base_url: String,
    pub static_dir: PathBuf,
    pub llm_max_tokens: u32,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// - `PORT` (default 3000)
    /// - `BLOB_BACKEND`: `fs` (default) or `memory`
    /// - `BLOB_DIR` (default `./blobs`)
    /// - `BLOB_PUBLIC_BASE_URL` (default `/blobs`)
    /// - `STATIC_DIR` (default `./public`)
    /// - `LLM_MAX_TOKENS` (default 2048)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let blob_backend = match lookup("BLOB_BACKEND").as_deref() {
            Some("memory") => BlobBackend::Memory,
            Some("fs") | None => BlobBackend::Fs,
            Some(other) => {
                tracing::warn!(value = other, "unknown BLOB_BACKEND, using fs");
                BlobBackend::Fs
            }
        };
        let blob_public_base_url = lookup("BLOB_PUBLIC_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BLOB_PUBLIC_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        Self {
            port: env_parse(&lookup, "PORT", DEFAULT_PORT),
            blob_backend,
            blob_dir: lookup("BLOB_DIR").map_or_else(|| PathBuf::from(DEFAULT_BLOB_DIR), PathBuf::from),
            blob_public_base_url,
            static_dir: lookup("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            llm_max_tokens: env_parse(&lookup, "LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS),
        }
    }

    /// Local route prefix the blob directory is mounted at, when the public
    /// base URL is a path on this server.
    #[must_use]
    pub fn blob_mount_path(&self) -> Option<&str> {
        let base = self.blob_public_base_url.as_str();
        (self.blob_backend == BlobBackend::Fs && base.starts_with('/') && base.len() > 1).then_some(base)
    }
}

/// Parse `key` from `lookup`, falling back to `default` when absent or invalid.
pub fn env_parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    lookup(key).and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
