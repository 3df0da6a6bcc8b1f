//! The validated deployment parameter model.
//!
//! [`DeploymentParameters`] is built once per run by
//! [`Validator::validate`](crate::domain::Validator::validate) and handed to
//! every downstream stage by shared reference. There are no setters: a value
//! that exists is a value that passed validation.
//!
//! Secret-bearing fields are [`SecretString`]s so that `Debug` output of the
//! model (and therefore any `tracing` field that captures it) shows
//! `[REDACTED]` instead of the credential.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::domain::value_objects::{AuthScheme, ConfigFormat, LogLevel, SearchMode, Switch};

/// Coordination service and process-wide settings.
#[derive(Debug)]
pub struct Coordination {
    /// Discovery/registration address, e.g. `127.0.0.1:2181`.
    pub discovery: String,
    /// Address registered in discovery instead of the detected one.
    pub register_ip: Option<String>,
    pub log_level: LogLevel,
}

/// Document store (MongoDB) connection settings.
#[derive(Debug)]
pub struct DocumentStore {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub database: String,
    pub replica_set: String,
    pub transactions: Switch,
}

/// Cache (Redis) connection settings.
#[derive(Debug)]
pub struct Cache {
    pub host: String,
    pub port: u16,
    pub password: SecretString,
    pub sentinel_password: Option<SecretString>,
}

impl Cache {
    /// Composite `host:port` string used by every cache section.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Externally visible URLs and the public listen port.
#[derive(Debug)]
pub struct Endpoints {
    pub site_url: String,
    pub platform_url: String,
    /// Overrides the registry port of the externally-facing service.
    pub listen_port: Option<u16>,
}

/// Authentication backend settings.
#[derive(Debug)]
pub struct Auth {
    pub scheme: AuthScheme,
    pub enabled: Switch,
    pub address: String,
    pub app_code: String,
    pub app_secret: SecretString,
    pub sync_workers: u32,
    pub sync_interval_minutes: u32,
}

impl Auth {
    /// Login mode derived from the enabled flag.
    pub const fn login_mode(&self) -> &'static str {
        if self.enabled.is_on() {
            "blueking"
        } else {
            "opensource"
        }
    }

    /// Session-skip value derived from the enabled flag.
    pub const fn session_skip(&self) -> &'static str {
        if self.enabled.is_on() { "0" } else { "1" }
    }
}

/// Optional full-text search engine.
#[derive(Debug)]
pub struct FullTextSearch {
    pub mode: SearchMode,
    pub url: String,
    pub user: String,
    pub password: SecretString,
}

/// Optional secrets/key-management service.
#[derive(Debug)]
pub struct Crypto {
    pub enabled: Switch,
    pub key_url: String,
    pub addresses: String,
    pub token: SecretString,
    pub project: String,
    pub environment: String,
}

/// Where and how artifacts are written.
#[derive(Debug)]
pub struct Output {
    pub format: ConfigFormat,
    /// Deployment root that holds the `cmdb_*` service directories.
    pub deploy_root: PathBuf,
}

/// The full, validated, immutable parameter set for one run.
#[derive(Debug)]
pub struct DeploymentParameters {
    pub(crate) coordination: Coordination,
    pub(crate) document_store: DocumentStore,
    pub(crate) cache: Cache,
    pub(crate) endpoints: Endpoints,
    pub(crate) auth: Auth,
    pub(crate) search: FullTextSearch,
    pub(crate) crypto: Crypto,
    pub(crate) user_info: SecretString,
    pub(crate) output: Output,
}

impl DeploymentParameters {
    pub fn coordination(&self) -> &Coordination {
        &self.coordination
    }

    pub fn document_store(&self) -> &DocumentStore {
        &self.document_store
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn search(&self) -> &FullTextSearch {
        &self.search
    }

    pub fn crypto(&self) -> &Crypto {
        &self.crypto
    }

    /// Multi-user credential list, `user:password` pairs joined by commas.
    pub fn user_info(&self) -> &str {
        self.user_info.expose_secret()
    }

    pub fn format(&self) -> ConfigFormat {
        self.output.format
    }

    pub fn deploy_root(&self) -> &Path {
        &self.output.deploy_root
    }

    pub fn log_level(&self) -> LogLevel {
        self.coordination.log_level
    }

    pub fn register_ip(&self) -> Option<&str> {
        self.coordination.register_ip.as_deref()
    }
}
