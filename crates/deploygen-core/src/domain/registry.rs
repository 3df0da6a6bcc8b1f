//! Service registry.
//!
//! A single static table describing every service in the platform: its
//! default listening port, which catalog templates it owns, and which
//! optional start-script flags it consumes. The registry is closed; the
//! start-script patcher treats any other `cmdb_*` directory as unknown and
//! gives it [`FALLBACK_PORT`].
//!
//! # Adding a Service
//!
//! 1. Add one [`ServiceDescriptor`] entry to [`SERVICE_REGISTRY`]
//! 2. If it owns configuration, add its templates to the catalog data
//! 3. Discovery and patching derive from this table

use serde::Serialize;

/// Directory-name prefix that marks a service directory.
pub const SERVICE_PREFIX: &str = "cmdb_";

/// The admin/migration service. It bootstraps the database and reads its
/// configuration from the rendered migration artifact instead of discovery.
pub const ADMIN_SERVICE: &str = "cmdb_adminserver";

/// The externally-facing service whose port `listen_port` overrides.
pub const PUBLIC_SERVICE: &str = "cmdb_webserver";

/// Port used for a discovered service the registry does not know.
pub const FALLBACK_PORT: u16 = 9999;

/// Which optional start-script flags a service consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeatureFlags {
    /// `--enable-auth=<true|false>`
    pub auth: bool,
    /// `--enable-crypto=<true|false>`
    pub crypto: bool,
    /// `--register-ip=<ip>`, only emitted when an IP was supplied.
    pub register_ip: bool,
}

impl FeatureFlags {
    /// Flags every service gets, including unregistered ones.
    pub const BASE: Self = Self {
        auth: false,
        crypto: false,
        register_ip: true,
    };

    const AUTH: Self = Self {
        auth: true,
        ..Self::BASE
    };

    const CRYPTO: Self = Self {
        crypto: true,
        ..Self::BASE
    };
}

/// Static description of one platform service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Directory and process name, e.g. `cmdb_apiserver`.
    pub name: &'static str,
    pub default_port: u16,
    /// Catalog template names (file stems) this service owns.
    pub templates: &'static [&'static str],
    pub flags: FeatureFlags,
}

/// Single source of truth for all services, ordered by name.
pub static SERVICE_REGISTRY: &[ServiceDescriptor] = &[
    ServiceDescriptor {
        name: ADMIN_SERVICE,
        default_port: 60004,
        templates: &["redis", "mongodb", "common", "extra", "migrate"],
        flags: FeatureFlags::BASE,
    },
    ServiceDescriptor {
        name: "cmdb_apiserver",
        default_port: 8080,
        templates: &[],
        flags: FeatureFlags::AUTH,
    },
    ServiceDescriptor {
        name: "cmdb_coreservice",
        default_port: 50009,
        templates: &["crypto"],
        flags: FeatureFlags::CRYPTO,
    },
    ServiceDescriptor {
        name: "cmdb_datacollection",
        default_port: 60005,
        templates: &[],
        flags: FeatureFlags::AUTH,
    },
    ServiceDescriptor {
        name: "cmdb_eventserver",
        default_port: 60009,
        templates: &[],
        flags: FeatureFlags::AUTH,
    },
    ServiceDescriptor {
        name: "cmdb_hostserver",
        default_port: 60001,
        templates: &[],
        flags: FeatureFlags::AUTH,
    },
    ServiceDescriptor {
        name: "cmdb_operationserver",
        default_port: 60011,
        templates: &[],
        flags: FeatureFlags::AUTH,
    },
    ServiceDescriptor {
        name: "cmdb_procserver",
        default_port: 60003,
        templates: &[],
        flags: FeatureFlags::AUTH,
    },
    ServiceDescriptor {
        name: "cmdb_synchronizeserver",
        default_port: 60010,
        templates: &[],
        flags: FeatureFlags::BASE,
    },
    ServiceDescriptor {
        name: "cmdb_taskserver",
        default_port: 60012,
        templates: &[],
        flags: FeatureFlags::BASE,
    },
    ServiceDescriptor {
        name: "cmdb_toposerver",
        default_port: 60002,
        templates: &[],
        flags: FeatureFlags::AUTH,
    },
    ServiceDescriptor {
        name: PUBLIC_SERVICE,
        default_port: 8083,
        templates: &[],
        flags: FeatureFlags::BASE,
    },
];

/// Look up a service by directory name.
pub fn find_service(name: &str) -> Option<&'static ServiceDescriptor> {
    SERVICE_REGISTRY.iter().find(|svc| svc.name == name)
}

/// The service that owns a catalog template, if any.
pub fn owner_of(template: &str) -> Option<&'static ServiceDescriptor> {
    SERVICE_REGISTRY
        .iter()
        .find(|svc| svc.templates.iter().any(|owned| *owned == template))
}

/// Whether a directory name follows the service naming convention.
pub fn is_service_dir(name: &str) -> bool {
    name.starts_with(SERVICE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_consistent() {
        let mut names: Vec<_> = SERVICE_REGISTRY.iter().map(|s| s.name).collect();
        let sorted = {
            let mut sorted = names.clone();
            sorted.sort_unstable();
            sorted
        };
        assert_eq!(names, sorted, "registry must be ordered by name");
        names.dedup();
        assert_eq!(names.len(), SERVICE_REGISTRY.len(), "duplicate service name");

        let mut templates: Vec<_> = SERVICE_REGISTRY
            .iter()
            .flat_map(|s| s.templates.iter().copied())
            .collect();
        let total = templates.len();
        templates.sort_unstable();
        templates.dedup();
        assert_eq!(templates.len(), total, "template owned by two services");

        for svc in SERVICE_REGISTRY {
            assert!(is_service_dir(svc.name), "{} lacks prefix", svc.name);
        }
        assert!(find_service(ADMIN_SERVICE).is_some());
        assert!(find_service(PUBLIC_SERVICE).is_some());
    }

    #[test]
    fn default_ports() {
        assert_eq!(find_service("cmdb_apiserver").unwrap().default_port, 8080);
        assert_eq!(find_service(PUBLIC_SERVICE).unwrap().default_port, 8083);
        assert_eq!(find_service(ADMIN_SERVICE).unwrap().default_port, 60004);
        assert!(find_service("cmdb_unknown").is_none());
    }

    #[test]
    fn auth_consumers() {
        let consumers: Vec<_> = SERVICE_REGISTRY
            .iter()
            .filter(|s| s.flags.auth)
            .map(|s| s.name)
            .collect();
        assert_eq!(
            consumers,
            [
                "cmdb_apiserver",
                "cmdb_datacollection",
                "cmdb_eventserver",
                "cmdb_hostserver",
                "cmdb_operationserver",
                "cmdb_procserver",
                "cmdb_toposerver",
            ]
        );
    }

    #[test]
    fn crypto_template_belongs_to_its_consumer() {
        let owner = owner_of("crypto").unwrap();
        assert!(owner.flags.crypto);
        assert_eq!(owner_of("migrate").unwrap().name, ADMIN_SERVICE);
    }
}
