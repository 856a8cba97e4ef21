//! Implementation of the `relink extensions` command.

use relink_adapters::{PulldownRenderer, builtin};
use relink_core::{
    application::{ExtensionInfo, RenderService},
    domain::ExtensionId,
};
use std::collections::BTreeSet;

use crate::{
    cli::{ExtensionsArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ExtensionsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = RenderService::with_extensions(
        Box::new(PulldownRenderer::new()),
        builtin::factories(&config.resolver.settings()),
    )?;
    service.check_ordering()?;
    let extensions = service.extensions();

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Resolver extensions (in chain order):")?;
            output.print(&format!(
                "  {:<16} {:<8} {:<28} {}",
                "ID", "SCOPE", "AFTER", "BEFORE"
            ))?;
            for ext in &extensions {
                output.print(&table_row(ext))?;
            }
        }
        ListFormat::List => {
            for ext in &extensions {
                output.emit(&format!("{}\n", ext.id))?;
            }
        }
        ListFormat::Json => output.json(&extensions)?,
    }

    Ok(())
}

fn table_row(ext: &ExtensionInfo) -> String {
    let scope = if ext.global_scope { "global" } else { "document" };
    format!(
        "  {:<16} {:<8} {:<28} {}",
        ext.id,
        scope,
        join(&ext.after),
        join(&ext.before)
    )
}

fn join(ids: &BTreeSet<ExtensionId>) -> String {
    if ids.is_empty() {
        return "-".into();
    }
    ids.iter()
        .map(ExtensionId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
