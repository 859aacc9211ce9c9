//! Cerne document preview
//!
//! Renders a stored editor document to HTML on stdout, using the same
//! engine that serves public pages.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::RngCore;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cerne_render::{
    DocumentRenderer, OrdinalIds, RenderConfig, RendererRegistry, StaticCsrfToken,
    StaticFormRepository, UrlPolicy,
};

/// Render a stored document to HTML.
#[derive(Debug, Parser)]
#[command(name = "cerne-render", version, about)]
struct Cli {
    /// Document JSON file; reads stdin when omitted.
    input: Option<PathBuf>,

    /// JSON object mapping form id to form definition, for form blocks.
    #[arg(long)]
    forms: Option<PathBuf>,

    /// CSRF token to embed in forms (default: freshly generated).
    #[arg(long)]
    csrf_token: Option<String>,

    /// Number element ids by render order instead of making them unique.
    #[arg(long)]
    deterministic_ids: bool,

    /// Maximum node nesting depth (overrides RENDER_MAX_DEPTH).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Emit URL attributes without scheme checks (overrides RENDER_URL_POLICY).
    #[arg(long)]
    permissive_urls: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = RenderConfig::from_env().context("failed to load configuration")?;
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    if cli.permissive_urls {
        config.url_policy = UrlPolicy::Permissive;
    }
    debug!(?config, "configuration loaded");

    let mut registry = RendererRegistry::with_standard_renderers();
    if let Some(path) = &cli.forms {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read forms file {}", path.display()))?;
        let forms = StaticFormRepository::from_json(&raw)
            .with_context(|| format!("invalid forms file {}", path.display()))?;
        info!(forms = forms.len(), "form definitions loaded");

        let token = cli.csrf_token.clone().unwrap_or_else(generate_token);
        registry = registry.with_forms(Arc::new(forms), Arc::new(StaticCsrfToken(token)));
    }

    let mut renderer = DocumentRenderer::new(registry, config);
    if cli.deterministic_ids {
        renderer = renderer.with_id_generator(OrdinalIds);
    }

    let document = read_input(cli.input.as_ref())?;
    let html = renderer.render(&document);

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(html.as_bytes())
        .context("failed to write output")?;
    stdout.write_all(b"\n").context("failed to write output")?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read document {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read document from stdin")?;
            Ok(buf)
        }
    }
}

/// Random one-off CSRF token for previews (32 random bytes, hex-encoded).
fn generate_token() -> String {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    hex::encode(random_bytes)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
