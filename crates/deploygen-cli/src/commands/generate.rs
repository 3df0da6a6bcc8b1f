//! Implementation of the `deploygen generate` command.
//!
//! Validation runs to completion before anything touches the disk; a
//! rejected parameter set leaves the deployment root untouched.

use tracing::{debug, info, instrument};

use deploygen_adapters::{BuiltinCatalogStore, LocalFilesystem, PlaceholderRenderer};
use deploygen_core::{
    application::{ConfigService, PatchReport, StartupScriptPatcher},
    domain::{ArtifactSet, Validator, configures_dir},
    error::DeployError,
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(dry_run = args.dry_run, skip_scripts = args.skip_scripts))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let raw = config.layered(args.parameters.into_raw());
    debug!(parameters = ?raw, "Resolved parameter layers");

    let params = Validator::validate(&raw).map_err(DeployError::from)?;
    let root = params.deploy_root().display().to_string();
    info!(root = %root, format = %params.format(), "Parameters accepted");

    let configs = ConfigService::new(
        Box::new(BuiltinCatalogStore::with_builtin()?),
        Box::new(PlaceholderRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let patcher = StartupScriptPatcher::new(Box::new(LocalFilesystem::new()));

    if args.dry_run {
        let artifacts = configs.expand(&params)?;
        output.header(&format!("Dry run under {root}, nothing written:"))?;
        print_artifacts(&artifacts, &output)?;
        if !args.skip_scripts {
            let report = patcher.preview(&params)?;
            print_scripts(&report, &output)?;
        }
        return Ok(());
    }

    let artifacts = configs.generate(&params)?;
    output.success(&format!(
        "Wrote {} configuration files to {}",
        artifacts.len(),
        artifacts.root().join(configures_dir()).display()
    ))?;
    print_artifacts(&artifacts, &output)?;

    if args.skip_scripts {
        output.info("Start scripts skipped")?;
        return Ok(());
    }

    let report = patcher.patch_all(&params)?;
    print_scripts(&report, &output)?;
    if !report.is_success() {
        let mut services: Vec<String> = report.failed.iter().map(|f| f.service.clone()).collect();
        services.dedup();
        return Err(CliError::ScriptsFailed { services });
    }

    output.success(&format!(
        "Patched {} start scripts under {root}",
        report.patched.len()
    ))?;
    Ok(())
}

fn print_artifacts(artifacts: &ArtifactSet, output: &OutputManager) -> CliResult<()> {
    for artifact in artifacts.iter() {
        output.print(&format!(
            "  {:<44} {:>6} bytes",
            artifact.path.display(),
            artifact.size()
        ))?;
    }
    Ok(())
}

fn print_scripts(report: &PatchReport, output: &OutputManager) -> CliResult<()> {
    for service in &report.patched {
        let note = if service.registered { "" } else { "  (unregistered)" };
        output.print(&format!(
            "  {:<24} port {:<6} {}{note}",
            service.name,
            service.port,
            service.script.display()
        ))?;
    }
    for name in &report.skipped {
        output.info(&format!("{name}: no template.sh.start, skipped"))?;
    }
    for failure in &report.failed {
        output.warning(&format!("{}: {}", failure.service, failure.error))?;
    }
    if report.init_db_copied {
        output.print("  init_db.sh copied to the deployment root")?;
    }
    Ok(())
}
