//! Declarative flag schema.
//!
//! Every deployment parameter is described exactly once by a [`FlagSpec`]:
//! its name, its default, whether it is required, and whether it carries a
//! secret. The CLI builds its flags from this table, the config layer uses
//! it to recognise keys, and the validator uses it to fill defaults and run
//! presence checks in table order.
//!
//! # Adding a Parameter
//!
//! 1. Add one [`FlagSpec`] entry to [`FLAG_SCHEMA`]
//! 2. Add the typed field to `DeploymentParameters` and read it in the validator
//! 3. Reference it from a template via `RenderContext`

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::DomainError;

/// Description of one operator-supplied parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    /// Canonical parameter name (snake_case, as in the legacy flag spelling).
    pub name: &'static str,
    /// Value used when the operator supplies nothing.
    pub default: &'static str,
    /// Rejected with `MissingRequiredField` when still empty after defaults.
    pub required: bool,
    /// Never echoed to logs or debug output.
    pub secret: bool,
    /// One-line help text.
    pub help: &'static str,
}

impl FlagSpec {
    const fn new(name: &'static str, default: &'static str, help: &'static str) -> Self {
        Self {
            name,
            default,
            required: false,
            secret: false,
            help,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// The kebab-case long flag, e.g. `redis-ip`.
    pub fn long_flag(&self) -> String {
        self.name.replace('_', "-")
    }
}

/// Single source of truth for all parameters.
///
/// Ordering is semantic: presence checks run top to bottom and the first
/// missing required field is the one reported.
pub static FLAG_SCHEMA: &[FlagSpec] = &[
    // ── identity / coordination ──────────────────────────────────────────────
    FlagSpec::new(
        "discovery",
        "",
        "the ZooKeeper server address, eg:127.0.0.1:2181",
    )
    .required(),
    // The database name is checked ahead of the cache fields.
    FlagSpec::new("database", "cmdb", "the database name, default cmdb").required(),
    // ── cache ────────────────────────────────────────────────────────────────
    FlagSpec::new("redis_ip", "", "the redis ip, eg:127.0.0.1").required(),
    FlagSpec::new("redis_port", "6379", "the redis port, default:6379"),
    FlagSpec::new("redis_pass", "", "the redis user password")
        .required()
        .secret(),
    FlagSpec::new(
        "redis_sentinel_pass",
        "",
        "the redis sentinel password, empty when sentinel is not used",
    )
    .secret(),
    // ── document store ───────────────────────────────────────────────────────
    FlagSpec::new("mongo_ip", "", "the mongo ip, eg:127.0.0.1").required(),
    FlagSpec::new("mongo_port", "27017", "the mongo port, default:27017"),
    FlagSpec::new("mongo_user", "", "the mongo user name, eg:cc").required(),
    FlagSpec::new("mongo_pass", "", "the mongo password")
        .required()
        .secret(),
    FlagSpec::new("rs_name", "rs0", "the mongo replica set name, default: rs0"),
    FlagSpec::new(
        "mongo_txn_enabled",
        "false",
        "mongo transactions enabled, true or false",
    ),
    // ── public endpoints ─────────────────────────────────────────────────────
    FlagSpec::new(
        "blueking_cmdb_url",
        "",
        "the cmdb site url, eg: http://127.0.0.1:8088",
    )
    .required(),
    FlagSpec::new(
        "blueking_paas_url",
        "http://127.0.0.1",
        "the blueking paas url, eg: http://paas.domain.com",
    )
    .required(),
    FlagSpec::new(
        "listen_port",
        "",
        "the cmdb_webserver listen port, default: registry port 8083",
    ),
    // ── authentication ───────────────────────────────────────────────────────
    FlagSpec::new("auth_scheme", "internal", "auth scheme, internal or iam"),
    FlagSpec::new("auth_enabled", "false", "iam auth enabled, true or false"),
    FlagSpec::new("auth_address", "", "iam address"),
    FlagSpec::new("auth_app_code", "bk_cmdb", "app code for iam, default bk_cmdb"),
    FlagSpec::new("auth_app_secret", "", "app secret for iam").secret(),
    FlagSpec::new("auth_sync_workers", "100", "iam sync worker count"),
    FlagSpec::new(
        "auth_sync_interval_minutes",
        "45",
        "iam sync interval in minutes",
    ),
    // ── full-text search ─────────────────────────────────────────────────────
    FlagSpec::new("full_text_search", "off", "full text search, on or off"),
    FlagSpec::new(
        "es_url",
        "http://127.0.0.1:9200",
        "the es listen url, default: http://127.0.0.1:9200",
    ),
    FlagSpec::new("es_user", "", "the es user name"),
    FlagSpec::new("es_pass", "", "the es password").secret(),
    // ── secrets / crypto service ─────────────────────────────────────────────
    FlagSpec::new(
        "crypto_enabled",
        "false",
        "secrets service encryption enabled, true or false",
    ),
    FlagSpec::new("secret_key_url", "", "the secrets service key url"),
    FlagSpec::new("secrets_addrs", "", "the secrets service addresses"),
    FlagSpec::new("secrets_token", "", "the secrets service token").secret(),
    FlagSpec::new("secrets_project", "", "the secrets service project"),
    FlagSpec::new("secrets_env", "", "the secrets service environment"),
    // ── misc ─────────────────────────────────────────────────────────────────
    FlagSpec::new("log_level", "3", "log level to start cmdb process, default: 3"),
    FlagSpec::new(
        "register_ip",
        "",
        "the ip address registered on zookeeper, it can be domain",
    ),
    FlagSpec::new(
        "user_info",
        "",
        "system users, user1:password1,user2:password2",
    )
    .secret(),
    // ── output ───────────────────────────────────────────────────────────────
    FlagSpec::new("config_format", "ini", "rendered file layout, ini or yaml"),
    FlagSpec::new(
        "deploy_root",
        ".",
        "the deployment root holding the cmdb_* service directories",
    ),
];

/// Look up a parameter by canonical name.
pub fn find_flag(name: &str) -> Option<&'static FlagSpec> {
    FLAG_SCHEMA.iter().find(|spec| spec.name == name)
}

/// Raw textual key → value input, before validation.
///
/// Keys are canonical schema names. `Debug` redacts secret-bearing keys.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    values: BTreeMap<String, String>,
}

impl RawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, replacing any earlier one for the same key.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Builder-style [`Self::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Merge `other` over `self`; keys present in `other` win.
    pub fn merge(&mut self, other: RawParameters) {
        self.values.extend(other.values);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The supplied value, or the schema default when absent.
    pub fn value_or_default(&self, spec: &FlagSpec) -> String {
        self.get(spec.name).unwrap_or(spec.default).to_string()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Reject any key the schema does not know.
    pub fn ensure_known(&self) -> Result<(), DomainError> {
        match self.keys().find(|key| find_flag(key).is_none()) {
            Some(unknown) => Err(DomainError::UnknownParameter {
                name: unknown.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for RawParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            let secret = find_flag(key).is_some_and(|spec| spec.secret);
            if secret {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}
