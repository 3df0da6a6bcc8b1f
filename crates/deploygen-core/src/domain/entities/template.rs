//! Template catalog model and the render context.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TemplateCatalog (one per ConfigFormat)                     │
//! │  └── Vec<ConfigTemplate>                                    │
//! │       ├── name          "redis"                             │
//! │       ├── body          "[redis]\nhost = {{REDIS_ADDR}}..." │
//! │       └── placeholders  ["REDIS_ADDR", "REDIS_PASS", ...]   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext                                              │
//! │  ├── from_parameters(&DeploymentParameters)  every value    │
//! │  ├── restricted_to(&ConfigTemplate)          declared only  │
//! │  └── render(&ConfigTemplate) -> String       literal subst  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Placeholders are `{{NAME}}` tokens. Substitution is a single left-to-right
//! scan, so a substituted value is never itself re-scanned: a password that
//! happens to contain `{{` is emitted verbatim. Each value passes through
//! [`ConfigFormat::escape`] first. A token with no value in the
//! context is an [`DomainError::UnresolvedPlaceholder`] and nothing is
//! emitted for that template.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::ExposeSecret;

use crate::domain::{
    entities::{artifact::configures_dir, parameters::DeploymentParameters},
    error::DomainError,
    registry::{self, ServiceDescriptor},
    value_objects::ConfigFormat,
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One named, placeholder-bearing document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigTemplate {
    /// File stem, e.g. `redis`. Also the key used by the service registry.
    pub name: &'static str,
    pub format: ConfigFormat,
    pub body: &'static str,
    /// Every placeholder the body uses, declared up front.
    pub placeholders: &'static [&'static str],
}

impl ConfigTemplate {
    /// Output file name, e.g. `redis.conf`.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.name, self.format.extension())
    }

    /// The registry service that owns this template.
    pub fn owner(&self) -> Option<&'static ServiceDescriptor> {
        registry::owner_of(self.name)
    }

    /// Check that the body uses only declared placeholders.
    pub fn validate(&self) -> Result<(), DomainError> {
        for token in placeholders_in(self.body) {
            if !self.placeholders.iter().any(|declared| *declared == token) {
                return Err(DomainError::UnresolvedPlaceholder {
                    template: self.filename(),
                    placeholder: token.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The closed set of templates for one document format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    format: ConfigFormat,
    templates: Vec<ConfigTemplate>,
}

impl TemplateCatalog {
    pub fn new(format: ConfigFormat, templates: Vec<ConfigTemplate>) -> Self {
        Self { format, templates }
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    pub fn templates(&self) -> &[ConfigTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&ConfigTemplate, DomainError> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DomainError::UnknownTemplate {
                name: name.to_string(),
                format: self.format.to_string(),
            })
    }

    /// Templates owned by `service`, in registry order.
    pub fn for_service<'a>(
        &'a self,
        service: &'a ServiceDescriptor,
    ) -> impl Iterator<Item = &'a ConfigTemplate> + 'a {
        service
            .templates
            .iter()
            .filter_map(move |name| self.templates.iter().find(|t| t.name == *name))
    }

    /// Catalog and registry must agree: every template has exactly one owner
    /// and every registry-declared template exists in this catalog.
    pub fn validate(&self) -> Result<(), DomainError> {
        for template in &self.templates {
            if template.format != self.format {
                return Err(DomainError::UnknownTemplate {
                    name: template.filename(),
                    format: self.format.to_string(),
                });
            }
            if template.owner().is_none() {
                return Err(DomainError::UnknownTemplate {
                    name: template.name.to_string(),
                    format: "registry".into(),
                });
            }
            template.validate()?;
        }
        for service in registry::SERVICE_REGISTRY {
            for name in service.templates {
                self.get(name)?;
            }
        }
        Ok(())
    }
}

/// Values available for substitution.
///
/// Built once per run from the validated parameters, including the derived
/// values (login mode, session skip, `host:port` composites). `Debug` lists
/// keys only; the values include credentials.
#[derive(Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<&'static str, String>,
}

impl RenderContext {
    /// Compute every substitutable value from the parameter model.
    pub fn from_parameters(params: &DeploymentParameters) -> Self {
        let coordination = params.coordination();
        let mongo = params.document_store();
        let cache = params.cache();
        let endpoints = params.endpoints();
        let auth = params.auth();
        let search = params.search();
        let crypto = params.crypto();

        let configures = params.deploy_root().join(configures_dir());
        let mut configures = configures.display().to_string();
        configures.push('/');

        Self::default()
            .with("DISCOVERY", coordination.discovery.as_str())
            .with("LOG_LEVEL", coordination.log_level.to_string())
            .with("DATABASE", mongo.database.as_str())
            .with("MONGO_HOST", mongo.host.as_str())
            .with("MONGO_PORT", mongo.port.to_string())
            .with("MONGO_USER", mongo.user.as_str())
            .with("MONGO_PASS", mongo.password.expose_secret())
            .with("MONGO_RS_NAME", mongo.replica_set.as_str())
            .with("MONGO_TXN_ENABLED", mongo.transactions.to_string())
            .with("REDIS_ADDR", cache.address())
            .with("REDIS_PASS", cache.password.expose_secret())
            .with(
                "REDIS_SENTINEL_PASS",
                cache
                    .sentinel_password
                    .as_ref()
                    .map(|s| s.expose_secret())
                    .unwrap_or_default(),
            )
            .with("SITE_URL", endpoints.site_url.as_str())
            .with("PAAS_URL", endpoints.platform_url.as_str())
            .with("AGENT_URL", endpoints.platform_url.as_str())
            .with("UI_ROOT", "../web")
            .with("CONFIGURES_DIR", configures)
            .with("AUTH_SCHEME", auth.scheme.to_string())
            .with("AUTH_ENABLED", auth.enabled.to_string())
            .with("AUTH_ADDRESS", auth.address.as_str())
            .with("AUTH_APP_CODE", auth.app_code.as_str())
            .with("AUTH_APP_SECRET", auth.app_secret.expose_secret())
            .with("AUTH_SYNC_WORKERS", auth.sync_workers.to_string())
            .with(
                "AUTH_SYNC_INTERVAL_MINUTES",
                auth.sync_interval_minutes.to_string(),
            )
            .with("LOGIN_VERSION", auth.login_mode())
            .with("SESSION_SKIP", auth.session_skip())
            .with("FULL_TEXT_SEARCH", search.mode.to_string())
            .with("ES_URL", search.url.as_str())
            .with("ES_USER", search.user.as_str())
            .with("ES_PASS", search.password.expose_secret())
            .with("USER_INFO", params.user_info())
            .with("CRYPTO_ENABLED", crypto.enabled.to_string())
            .with("CRYPTO_KEY_URL", crypto.key_url.as_str())
            .with("CRYPTO_ADDRS", crypto.addresses.as_str())
            .with("CRYPTO_TOKEN", crypto.token.expose_secret())
            .with("CRYPTO_PROJECT", crypto.project.as_str())
            .with("CRYPTO_ENV", crypto.environment.as_str())
    }

    /// Add or replace a variable, consuming self.
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.variables.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variables.keys().copied()
    }

    /// Narrow the context to the placeholders `template` declares.
    ///
    /// A declared placeholder this context cannot supply means the catalog
    /// and the context builder disagree.
    pub fn restricted_to(&self, template: &ConfigTemplate) -> Result<Self, DomainError> {
        let mut variables = BTreeMap::new();
        for &key in template.placeholders {
            let value = self
                .variables
                .get(key)
                .ok_or_else(|| DomainError::UnresolvedPlaceholder {
                    template: template.filename(),
                    placeholder: key.to_string(),
                })?;
            variables.insert(key, value.clone());
        }
        Ok(Self { variables })
    }

    /// Replace every `{{NAME}}` token in the template body.
    pub fn render(&self, template: &ConfigTemplate) -> Result<String, DomainError> {
        let mut out = String::with_capacity(template.body.len());
        for segment in segments(template.body) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value =
                        self.get(name)
                            .ok_or_else(|| DomainError::UnresolvedPlaceholder {
                                template: template.filename(),
                                placeholder: name.to_string(),
                            })?;
                    out.push_str(&template.format.escape(value));
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("keys", &self.variables.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Names of every `{{NAME}}` token in `body`, in order of appearance.
pub fn placeholders_in(body: &str) -> Vec<&str> {
    segments(body)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name),
            Segment::Text(_) => None,
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn segments(body: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        if start > 0 {
            out.push(Segment::Text(&rest[..start]));
        }
        out.push(Segment::Placeholder(after_open[..end].trim()));
        rest = &after_open[end + CLOSE.len()..];
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}
