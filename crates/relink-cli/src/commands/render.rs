//! Implementation of the `relink render` command.
//!
//! Responsibility: turn CLI arguments and configuration into resolver
//! settings and a context, drive the core render service over the selected
//! documents, and write the results. No link logic lives here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use relink_adapters::{PulldownRenderer, ResolverSettings, builtin, documents};
use relink_core::{application::RenderService, domain::ResolverContext};

use crate::{
    cli::RenderArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// One rendered document, as reported with `--output-format json`.
#[derive(Debug, Serialize)]
struct Rendered {
    source: PathBuf,
    output: PathBuf,
}

/// Execute the `relink render` command.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = resolver_settings(&args, &config);
    let properties = context_properties(&args, &config);

    let service = RenderService::with_extensions(
        Box::new(PulldownRenderer::new()),
        builtin::factories(&settings),
    )?;
    let sources = documents::collect(&args.path)?;

    if args.path.is_file() {
        let html = render_document(&service, &args.path, &properties)?;
        return match &args.output {
            None => output.emit(&html).map_err(CliError::from),
            Some(out) => {
                let target = if out.is_dir() {
                    documents::html_path(&args.path, &args.path, out)
                } else {
                    out.clone()
                };
                write_html(&target, &html)?;
                report(&output, &[Rendered {
                    source: args.path.clone(),
                    output: target,
                }])
            }
        };
    }

    let out_dir = args.output.clone().ok_or_else(|| CliError::OutputRequired {
        path: args.path.clone(),
    })?;
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(CliError::OutputNotDirectory { path: out_dir });
    }

    let mut rendered = Vec::with_capacity(sources.len());
    for source in sources {
        let html = render_document(&service, &source, &properties)?;
        let target = documents::html_path(&args.path, &source, &out_dir);
        write_html(&target, &html)?;
        rendered.push(Rendered {
            source,
            output: target,
        });
    }

    info!(documents = rendered.len(), out = %out_dir.display(), "Directory rendered");
    report(&output, &rendered)
}

/// CLI flags override configuration.
fn resolver_settings(args: &RenderArgs, config: &AppConfig) -> ResolverSettings {
    let mut settings = config.resolver.settings();
    if let Some(base_url) = &args.base_url {
        settings.base_url = Some(base_url.clone());
    }
    if let Some(prefix) = &args.wiki_prefix {
        settings.wiki_prefix = prefix.clone();
    }
    if args.no_md_rewrite {
        settings.rewrite_markdown = false;
    }
    settings
}

/// Configured properties, then `-D` definitions in command-line order.
fn context_properties(args: &RenderArgs, config: &AppConfig) -> BTreeMap<String, String> {
    let mut properties = config.resolver.properties.clone();
    properties.extend(args.define.iter().cloned());
    properties
}

fn render_document(
    service: &RenderService,
    source: &Path,
    properties: &BTreeMap<String, String>,
) -> CliResult<String> {
    let markdown = fs::read_to_string(source)
        .with_cli_context(|| format!("Failed to read '{}'", source.display()))?;
    let ctx = ResolverContext::new()
        .with_document(source)
        .with_properties(properties.clone());
    service
        .render(&markdown, &ctx)
        .with_cli_context(|| format!("rendering '{}'", source.display()))
}

fn write_html(target: &Path, html: &str) -> CliResult<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create output directory '{}'", parent.display())
        })?;
    }
    fs::write(target, html)
        .with_cli_context(|| format!("Failed to write '{}'", target.display()))
}

fn report(output: &OutputManager, rendered: &[Rendered]) -> CliResult<()> {
    if output.is_json() {
        output.json(rendered)?;
        return Ok(());
    }
    for doc in rendered {
        output.print(&format!(
            "  {} -> {}",
            doc.source.display(),
            doc.output.display()
        ))?;
    }
    let noun = if rendered.len() == 1 { "document" } else { "documents" };
    output.success(&format!("Rendered {} {noun}", rendered.len()))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
