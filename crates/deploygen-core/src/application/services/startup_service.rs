//! Startup Script Patcher - per-service `start.sh` generation.
//!
//! Every `cmdb_*` directory directly under the deployment root may carry a
//! `template.sh.start`. Its placeholder tokens are replaced literally and the
//! result is written next to it as an executable `start.sh`. Directories
//! without a template are skipped. A failure in one service is recorded in
//! the [`PatchReport`] and the remaining services are still processed.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        ADMIN_SERVICE, DeploymentParameters, DomainError, FALLBACK_PORT, FeatureFlags,
        PUBLIC_SERVICE, find_service, is_service_dir, migration_artifact,
    },
    error::{DeployError, DeployResult},
};

/// Per-service script template, read from the service directory.
pub const START_TEMPLATE: &str = "template.sh.start";
/// Rendered script, written next to the template.
pub const START_SCRIPT: &str = "start.sh";
/// Database bootstrap script shipped with the admin service.
pub const INIT_DB_SCRIPT: &str = "init_db.sh";

const NAME_TOKEN: &str = "cmdb-name-placeholder";
const PORT_TOKEN: &str = "cmdb-port-placeholder";
const DISCOVERY_TOKEN: &str = "rd_server_placeholder";
const FLAGS_TOKEN: &str = "extend_flag_placeholder";
const LOG_LEVEL_TOKEN: &str = "log_level_placeholder";

const TOKENS: [&str; 5] = [
    NAME_TOKEN,
    PORT_TOKEN,
    DISCOVERY_TOKEN,
    FLAGS_TOKEN,
    LOG_LEVEL_TOKEN,
];

/// One service whose start script was (or would be) written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchedService {
    pub name: String,
    pub port: u16,
    /// Absolute path of the written `start.sh`.
    pub script: PathBuf,
    /// False when the directory is not in the service registry.
    pub registered: bool,
}

/// A service whose script could not be produced.
#[derive(Debug, Clone)]
pub struct PatchFailure {
    pub service: String,
    pub error: DeployError,
}

/// Outcome of one patching pass.
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    pub patched: Vec<PatchedService>,
    /// Service directories without a script template.
    pub skipped: Vec<String>,
    pub failed: Vec<PatchFailure>,
    /// Whether the admin service's database bootstrap script was copied.
    pub init_db_copied: bool,
}

impl PatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total `cmdb_*` directories seen.
    pub fn discovered(&self) -> usize {
        self.patched
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.skipped.iter().map(String::as_str))
            .chain(self.failed.iter().map(|f| f.service.as_str()))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Generates `start.sh` for every discovered service directory.
pub struct StartupScriptPatcher {
    filesystem: Box<dyn Filesystem>,
}

impl StartupScriptPatcher {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Patch and write every script.
    pub fn patch_all(&self, params: &DeploymentParameters) -> DeployResult<PatchReport> {
        self.run(params, true)
    }

    /// Compute the same report without writing or copying anything.
    pub fn preview(&self, params: &DeploymentParameters) -> DeployResult<PatchReport> {
        self.run(params, false)
    }

    #[instrument(skip_all, fields(root = %params.deploy_root().display(), write = write))]
    fn run(&self, params: &DeploymentParameters, write: bool) -> DeployResult<PatchReport> {
        let root = params.deploy_root();
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::DeployRootMissing {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut report = PatchReport::default();
        let services = self
            .filesystem
            .list_dirs(root)?
            .into_iter()
            .filter(|name| is_service_dir(name));

        for name in services {
            let dir = root.join(&name);

            if name == ADMIN_SERVICE {
                match self.copy_init_db(root, &dir, write) {
                    Ok(copied) => report.init_db_copied = copied,
                    Err(error) => {
                        warn!(service = %name, error = %error, "Copying init_db.sh failed");
                        report.failed.push(PatchFailure {
                            error: ApplicationError::ScriptPatchFailed {
                                service: name.clone(),
                                reason: format!("copying {INIT_DB_SCRIPT}: {error}"),
                            }
                            .into(),
                            service: name.clone(),
                        });
                    }
                }
            }

            if !self.filesystem.is_file(&dir.join(START_TEMPLATE)) {
                debug!(service = %name, "No start template, skipping");
                report.skipped.push(name);
                continue;
            }

            match self.patch_one(params, &name, &dir, write) {
                Ok(patched) => {
                    debug!(service = %name, port = patched.port, "Start script patched");
                    report.patched.push(patched);
                }
                Err(error) => {
                    warn!(service = %name, error = %error, "Start script failed");
                    report.failed.push(PatchFailure {
                        error: ApplicationError::ScriptPatchFailed {
                            service: name.clone(),
                            reason: error.to_string(),
                        }
                        .into(),
                        service: name,
                    });
                }
            }
        }

        info!(
            patched = report.patched.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Start scripts processed"
        );
        Ok(report)
    }

    fn patch_one(
        &self,
        params: &DeploymentParameters,
        name: &str,
        dir: &Path,
        write: bool,
    ) -> DeployResult<PatchedService> {
        let template = self.filesystem.read_file(&dir.join(START_TEMPLATE))?;
        let port = service_port(params, name);
        let script = render_start_script(&template, params, name, port)?;

        let target = dir.join(START_SCRIPT);
        if write {
            self.filesystem.write_file(&target, &script)?;
            self.filesystem.set_permissions(&target, true)?;
        }

        Ok(PatchedService {
            name: name.to_string(),
            port,
            script: target,
            registered: find_service(name).is_some(),
        })
    }

    fn copy_init_db(&self, root: &Path, admin_dir: &Path, write: bool) -> DeployResult<bool> {
        let source = admin_dir.join(INIT_DB_SCRIPT);
        if !self.filesystem.is_file(&source) {
            return Ok(false);
        }
        if write {
            self.filesystem.copy_file(&source, &root.join(INIT_DB_SCRIPT))?;
        }
        Ok(true)
    }
}

/// Port a service listens on.
///
/// The public service honours `listen_port`; directories unknown to the
/// registry get [`FALLBACK_PORT`].
pub fn service_port(params: &DeploymentParameters, name: &str) -> u16 {
    match find_service(name) {
        Some(svc) if svc.name == PUBLIC_SERVICE => params
            .endpoints()
            .listen_port
            .unwrap_or(svc.default_port),
        Some(svc) => svc.default_port,
        None => FALLBACK_PORT,
    }
}

/// Extra command-line flags appended to a service's start command.
///
/// Each flag is padded with a space on both sides.
pub fn extend_flags(params: &DeploymentParameters, name: &str) -> String {
    let flags = find_service(name).map_or(FeatureFlags::BASE, |svc| svc.flags);
    let mut out = String::new();
    if flags.auth {
        out.push_str(&format!(" --enable-auth={} ", params.auth().enabled));
    }
    if flags.crypto {
        out.push_str(&format!(" --enable-crypto={} ", params.crypto().enabled));
    }
    if flags.register_ip {
        if let Some(ip) = params.register_ip() {
            out.push_str(&format!(" --register-ip={ip} "));
        }
    }
    out
}

/// Replace every start-script token for one service.
pub fn render_start_script(
    template: &str,
    params: &DeploymentParameters,
    name: &str,
    port: u16,
) -> Result<String, DomainError> {
    let mut script = template
        .replace(NAME_TOKEN, name)
        .replace(PORT_TOKEN, &port.to_string());

    script = if name == ADMIN_SERVICE {
        script
            .replace(DISCOVERY_TOKEN, &migration_artifact(params.format()))
            .replace("regdiscv", "config")
    } else {
        script.replace(DISCOVERY_TOKEN, &params.coordination().discovery)
    };

    script = script
        .replace(FLAGS_TOKEN, &extend_flags(params, name))
        .replace(LOG_LEVEL_TOKEN, &params.log_level().to_string());

    if let Some(token) = TOKENS.iter().find(|token| script.contains(*token)) {
        return Err(DomainError::UnresolvedPlaceholder {
            template: format!("{name}/{START_TEMPLATE}"),
            placeholder: (*token).to_string(),
        });
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockall::predicate::*;

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::application::services::fixtures;
    use crate::domain::Validator;

    const TEMPLATE: &str = "#!/bin/bash\n\
        ./cmdb-name-placeholder --addrport=127.0.0.1:cmdb-port-placeholder \
        --regdiscv=rd_server_placeholder --v=log_level_placeholder extend_flag_placeholder\n";

    fn params(extra: &[(&str, &str)]) -> DeploymentParameters {
        let mut raw = fixtures::raw("/deploy");
        for (key, value) in extra {
            raw.set(*key, *value);
        }
        Validator::validate(&raw).unwrap()
    }

    #[test]
    fn ports_follow_registry_override_and_fallback() {
        let p = params(&[("listen_port", "9001")]);
        assert_eq!(service_port(&p, "cmdb_webserver"), 9001);
        assert_eq!(service_port(&p, "cmdb_apiserver"), 8080);
        assert_eq!(service_port(&p, "cmdb_newserver"), FALLBACK_PORT);

        let p = params(&[]);
        assert_eq!(service_port(&p, "cmdb_webserver"), 8083);
    }

    #[test]
    fn auth_flag_only_for_auth_consumers() {
        let p = params(&[("auth_enabled", "true")]);
        assert_eq!(extend_flags(&p, "cmdb_apiserver"), " --enable-auth=true ");
        assert_eq!(extend_flags(&p, "cmdb_taskserver"), "");
        assert_eq!(extend_flags(&p, "cmdb_coreservice"), " --enable-crypto=false ");
    }

    #[test]
    fn register_ip_applies_everywhere_when_set() {
        let p = params(&[("register_ip", "10.1.1.1")]);
        assert_eq!(
            extend_flags(&p, "cmdb_hostserver"),
            " --enable-auth=false  --register-ip=10.1.1.1 "
        );
        assert_eq!(extend_flags(&p, "cmdb_unknown"), " --register-ip=10.1.1.1 ");
    }

    #[test]
    fn renders_regular_service() {
        let p = params(&[]);
        let script = render_start_script(TEMPLATE, &p, "cmdb_toposerver", 60002).unwrap();
        assert_eq!(
            script,
            "#!/bin/bash\n./cmdb_toposerver --addrport=127.0.0.1:60002 \
             --regdiscv=127.0.0.1:2181 --v=3  --enable-auth=false \n"
        );
    }

    #[test]
    fn admin_service_reads_migration_file() {
        let p = params(&[("config_format", "yaml")]);
        let script = render_start_script(TEMPLATE, &p, ADMIN_SERVICE, 60004).unwrap();
        assert!(script.contains("--config=configures/migrate.yaml"));
        assert!(!script.contains("regdiscv"));
    }

    #[test]
    fn leftover_token_is_an_error() {
        let p = params(&[("discovery", "cmdb-name-placeholder")]);
        let err = render_start_script(TEMPLATE, &p, "cmdb_toposerver", 60002).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedPlaceholder {
                template: "cmdb_toposerver/template.sh.start".into(),
                placeholder: NAME_TOKEN.into(),
            }
        );
    }

    fn fs_with_services(dirs: &'static [&'static str]) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_list_dirs()
            .returning(move |_| Ok(dirs.iter().map(|d| d.to_string()).collect()));
        fs
    }

    #[test]
    fn missing_template_is_skipped_not_failed() {
        let mut fs = fs_with_services(&["cmdb_apiserver", "web", "cmdb_webserver"]);
        fs.expect_is_file()
            .with(eq(Path::new("/deploy/cmdb_apiserver/template.sh.start")))
            .returning(|_| false);
        fs.expect_is_file()
            .with(eq(Path::new("/deploy/cmdb_webserver/template.sh.start")))
            .returning(|_| true);
        fs.expect_read_file()
            .returning(|_| Ok("port=cmdb-port-placeholder\n".into()));
        fs.expect_write_file()
            .with(
                eq(Path::new("/deploy/cmdb_webserver/start.sh")),
                eq("port=8083\n"),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .with(eq(Path::new("/deploy/cmdb_webserver/start.sh")), eq(true))
            .times(1)
            .returning(|_, _| Ok(()));

        let report = StartupScriptPatcher::new(Box::new(fs))
            .patch_all(&params(&[]))
            .unwrap();
        assert_eq!(report.skipped, ["cmdb_apiserver"]);
        assert_eq!(report.patched.len(), 1);
        assert_eq!(report.discovered(), 2);
        assert!(report.is_success());
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let mut fs = fs_with_services(&["cmdb_hostserver", "cmdb_procserver"]);
        fs.expect_is_file().returning(|_| true);
        fs.expect_read_file()
            .with(eq(Path::new("/deploy/cmdb_hostserver/template.sh.start")))
            .returning(|path| {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "invalid utf-8".into(),
                }
                .into())
            });
        fs.expect_read_file()
            .with(eq(Path::new("/deploy/cmdb_procserver/template.sh.start")))
            .returning(|_| Ok("cmdb-name-placeholder".into()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));
        fs.expect_set_permissions().returning(|_, _| Ok(()));

        let report = StartupScriptPatcher::new(Box::new(fs))
            .patch_all(&params(&[]))
            .unwrap();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].service, "cmdb_hostserver");
        assert!(matches!(
            report.failed[0].error,
            DeployError::Application(ApplicationError::ScriptPatchFailed { .. })
        ));
        assert_eq!(report.patched[0].name, "cmdb_procserver");
    }

    #[test]
    fn admin_init_db_is_copied_to_root() {
        let mut fs = fs_with_services(&["cmdb_adminserver"]);
        fs.expect_is_file()
            .with(eq(Path::new("/deploy/cmdb_adminserver/init_db.sh")))
            .returning(|_| true);
        fs.expect_is_file()
            .with(eq(Path::new("/deploy/cmdb_adminserver/template.sh.start")))
            .returning(|_| false);
        fs.expect_copy_file()
            .with(
                eq(Path::new("/deploy/cmdb_adminserver/init_db.sh")),
                eq(Path::new("/deploy/init_db.sh")),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let report = StartupScriptPatcher::new(Box::new(fs))
            .patch_all(&params(&[]))
            .unwrap();
        assert!(report.init_db_copied);
        assert_eq!(report.skipped, [ADMIN_SERVICE]);
    }

    #[test]
    fn preview_writes_nothing() {
        let mut fs = fs_with_services(&["cmdb_adminserver", "cmdb_taskserver"]);
        fs.expect_is_file().returning(|_| true);
        fs.expect_read_file()
            .returning(|_| Ok("cmdb-name-placeholder".into()));
        fs.expect_write_file().never();
        fs.expect_copy_file().never();
        fs.expect_set_permissions().never();

        let report = StartupScriptPatcher::new(Box::new(fs))
            .preview(&params(&[]))
            .unwrap();
        assert!(report.init_db_copied);
        assert_eq!(report.patched.len(), 2);
        assert_eq!(report.patched[1].port, 60012);
    }

    #[test]
    fn failed_init_db_copy_still_patches_admin_script() {
        let mut fs = fs_with_services(&["cmdb_adminserver"]);
        fs.expect_is_file().returning(|_| true);
        fs.expect_copy_file().times(1).returning(|_, to| {
            Err(ApplicationError::FilesystemError {
                path: to.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });
        fs.expect_read_file()
            .returning(|_| Ok("--regdiscv=rd_server_placeholder".into()));
        fs.expect_write_file()
            .with(
                eq(Path::new("/deploy/cmdb_adminserver/start.sh")),
                eq("--config=configures/migrate.conf"),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions().times(1).returning(|_, _| Ok(()));

        let report = StartupScriptPatcher::new(Box::new(fs))
            .patch_all(&params(&[]))
            .unwrap();
        assert!(!report.init_db_copied);
        assert!(!report.is_success());
        assert_eq!(report.patched[0].name, ADMIN_SERVICE);
        assert_eq!(report.failed[0].service, ADMIN_SERVICE);
        assert!(report.failed[0].error.to_string().contains("init_db.sh"));
        assert_eq!(report.discovered(), 1);
    }
}
