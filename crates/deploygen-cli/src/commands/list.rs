//! Implementation of the `deploygen list` command.

use deploygen_adapters::BuiltinCatalogStore;
use deploygen_core::application::CatalogService;

use crate::{
    cli::{ListArgs, ListFormat, ListTarget},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let service = CatalogService::new(Box::new(BuiltinCatalogStore::with_builtin()?));

    match args.target {
        ListTarget::Services => {
            let services = service.services();
            match args.format {
                ListFormat::Json => output.data(&serde_json::to_string_pretty(&services)?)?,
                ListFormat::Table => {
                    output.header("Registered services:")?;
                    for svc in &services {
                        let mut flags = Vec::new();
                        if svc.auth_flag {
                            flags.push("auth");
                        }
                        if svc.crypto_flag {
                            flags.push("crypto");
                        }
                        output.print(&format!(
                            "  {:<24} {:>6}  {:<14} {}",
                            svc.name,
                            svc.port,
                            flags.join(","),
                            svc.templates.join(" ")
                        ))?;
                    }
                }
            }
        }
        ListTarget::Templates => {
            let templates = service.templates(args.config_format.map(Into::into))?;
            match args.format {
                ListFormat::Json => output.data(&serde_json::to_string_pretty(&templates)?)?,
                ListFormat::Table => {
                    output.header("Template catalog:")?;
                    for template in &templates {
                        output.print(&format!(
                            "  {:<14} {:<5} {:<18} {:>3} placeholders",
                            template.file,
                            template.format.to_string(),
                            template.owner,
                            template.placeholders.len()
                        ))?;
                    }
                }
            }
        }
    }

    Ok(())
}
