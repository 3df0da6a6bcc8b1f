use std::collections::BTreeMap;
use std::path::PathBuf;

use secrecy::SecretString;
use tracing::{debug, instrument};

use crate::domain::{
    entities::parameters::{
        Auth, Cache, Coordination, Crypto, DeploymentParameters, DocumentStore, Endpoints,
        FullTextSearch, Output,
    },
    error::DomainError,
    schema::{FLAG_SCHEMA, RawParameters},
    value_objects::{AuthScheme, ConfigFormat, Literal, LogLevel, SearchMode, Switch},
};

/// URL prefixes accepted for every URL-shaped parameter.
pub const ACCEPTED_SCHEMES: &[&str] = &["http://", "https://"];

/// Turns raw key/value input into [`DeploymentParameters`].
///
/// Fail-fast: the first violated rule is returned and nothing after it is
/// evaluated. Rule order:
///
/// 1. unknown keys
/// 2. required fields, in [`FLAG_SCHEMA`] order
/// 3. enumerations and numbers
/// 4. site/platform URL prefixes
/// 5. conditional rules: search URL, crypto service fields, iam fields
pub struct Validator;

impl Validator {
    #[instrument(skip_all)]
    pub fn validate(raw: &RawParameters) -> Result<DeploymentParameters, DomainError> {
        raw.ensure_known()?;
        let input = Resolved::new(raw);

        for spec in FLAG_SCHEMA.iter().filter(|spec| spec.required) {
            if input.get(spec.name).is_empty() {
                return Err(DomainError::MissingRequiredField { field: spec.name });
            }
        }

        let log_level = LogLevel::parse_for("log_level", input.get("log_level"))?;
        let mongo_txn = Switch::parse_for("mongo_txn_enabled", input.get("mongo_txn_enabled"))?;
        let auth_enabled = Switch::parse_for("auth_enabled", input.get("auth_enabled"))?;
        let crypto_enabled = Switch::parse_for("crypto_enabled", input.get("crypto_enabled"))?;
        let auth_scheme = AuthScheme::parse_for("auth_scheme", input.get("auth_scheme"))?;
        let search_mode = SearchMode::parse_for("full_text_search", input.get("full_text_search"))?;
        let format = ConfigFormat::parse_for("config_format", input.get("config_format"))?;

        let redis_port = parse_port("redis_port", input.get("redis_port"))?;
        let mongo_port = parse_port("mongo_port", input.get("mongo_port"))?;
        let listen_port = match input.get("listen_port") {
            "" => None,
            value => Some(parse_port("listen_port", value)?),
        };
        let sync_workers = parse_positive("auth_sync_workers", input.get("auth_sync_workers"))?;
        let sync_interval = parse_positive(
            "auth_sync_interval_minutes",
            input.get("auth_sync_interval_minutes"),
        )?;

        require_scheme("blueking_cmdb_url", input.get("blueking_cmdb_url"))?;
        require_scheme("blueking_paas_url", input.get("blueking_paas_url"))?;

        // (a) full-text search
        if search_mode.is_on() {
            require_scheme("es_url", input.get("es_url"))?;
        }

        // (b) secrets service
        if crypto_enabled.is_on() {
            const CONDITION: &str = "crypto_enabled is true";
            for field in [
                "secret_key_url",
                "secrets_addrs",
                "secrets_token",
                "secrets_project",
                "secrets_env",
            ] {
                require_present(field, input.get(field), CONDITION)?;
            }
            require_scheme("secret_key_url", input.get("secret_key_url"))?;
        }

        // (c) iam authentication
        if auth_scheme == AuthScheme::Iam && auth_enabled.is_on() {
            const CONDITION: &str = "iam auth is enabled";
            for field in ["auth_address", "auth_app_code", "auth_app_secret"] {
                require_present(field, input.get(field), CONDITION)?;
            }
            require_scheme("auth_address", input.get("auth_address"))?;
        }

        debug!(
            format = %format,
            auth_scheme = %auth_scheme,
            auth_enabled = %auth_enabled,
            full_text_search = %search_mode,
            crypto_enabled = %crypto_enabled,
            "parameters validated"
        );

        Ok(DeploymentParameters {
            coordination: Coordination {
                discovery: input.owned("discovery"),
                register_ip: input.optional("register_ip"),
                log_level,
            },
            document_store: DocumentStore {
                host: input.owned("mongo_ip"),
                port: mongo_port,
                user: input.owned("mongo_user"),
                password: input.secret("mongo_pass"),
                database: input.owned("database"),
                replica_set: input.owned("rs_name"),
                transactions: mongo_txn,
            },
            cache: Cache {
                host: input.owned("redis_ip"),
                port: redis_port,
                password: input.secret("redis_pass"),
                sentinel_password: input
                    .optional("redis_sentinel_pass")
                    .map(SecretString::from),
            },
            endpoints: Endpoints {
                site_url: input.owned("blueking_cmdb_url"),
                platform_url: input.owned("blueking_paas_url"),
                listen_port,
            },
            auth: Auth {
                scheme: auth_scheme,
                enabled: auth_enabled,
                address: input.owned("auth_address"),
                app_code: input.owned("auth_app_code"),
                app_secret: input.secret("auth_app_secret"),
                sync_workers,
                sync_interval_minutes: sync_interval,
            },
            search: FullTextSearch {
                mode: search_mode,
                url: input.owned("es_url"),
                user: input.owned("es_user"),
                password: input.secret("es_pass"),
            },
            crypto: Crypto {
                enabled: crypto_enabled,
                key_url: input.owned("secret_key_url"),
                addresses: input.owned("secrets_addrs"),
                token: input.secret("secrets_token"),
                project: input.owned("secrets_project"),
                environment: input.owned("secrets_env"),
            },
            user_info: input.secret("user_info"),
            output: Output {
                format,
                deploy_root: PathBuf::from(input.get("deploy_root")),
            },
        })
    }
}

/// Raw input with schema defaults filled in.
struct Resolved {
    values: BTreeMap<&'static str, String>,
}

impl Resolved {
    fn new(raw: &RawParameters) -> Self {
        Self {
            values: FLAG_SCHEMA
                .iter()
                .map(|spec| (spec.name, raw.value_or_default(spec)))
                .collect(),
        }
    }

    fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    fn owned(&self, name: &str) -> String {
        self.get(name).to_string()
    }

    fn optional(&self, name: &str) -> Option<String> {
        Some(self.get(name))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn secret(&self, name: &str) -> SecretString {
        SecretString::from(self.owned(name))
    }
}

fn require_present(
    field: &'static str,
    value: &str,
    condition: &'static str,
) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::ConditionalRequirementUnmet { field, condition });
    }
    Ok(())
}

fn require_scheme(field: &'static str, value: &str) -> Result<(), DomainError> {
    if ACCEPTED_SCHEMES
        .iter()
        .any(|scheme| value.starts_with(scheme))
    {
        Ok(())
    } else {
        Err(DomainError::MalformedUrl {
            field,
            accepted: ACCEPTED_SCHEMES,
        })
    }
}

fn parse_port(field: &'static str, value: &str) -> Result<u16, DomainError> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DomainError::InvalidNumber {
            field,
            value: value.to_string(),
            reason: "expected a port between 1 and 65535",
        }),
    }
}

fn parse_positive(field: &'static str, value: &str) -> Result<u32, DomainError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DomainError::InvalidNumber {
            field,
            value: value.to_string(),
            reason: "expected a positive integer",
        }),
    }
}
