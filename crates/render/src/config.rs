//! Renderer configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

use crate::escape::is_safe_url;

/// How URL-bearing attributes (links, media sources, button targets) are
/// treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlPolicy {
    /// Only relative URLs, fragments and `http`, `https`, `mailto`, `tel`.
    #[default]
    Strict,
    /// Any value is emitted (still attribute-escaped).
    Permissive,
}

impl UrlPolicy {
    /// The trimmed URL when the policy accepts it.
    pub fn accept<'u>(&self, url: &'u str) -> Option<&'u str> {
        let trimmed = url.trim();
        match self {
            UrlPolicy::Permissive => Some(trimmed),
            UrlPolicy::Strict => is_safe_url(trimmed).then_some(trimmed),
        }
    }
}

impl FromStr for UrlPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(UrlPolicy::Strict),
            "permissive" => Ok(UrlPolicy::Permissive),
            other => bail!("unknown URL policy {other:?} (expected \"strict\" or \"permissive\")"),
        }
    }
}

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum node nesting depth; deeper nodes render empty (default: 64).
    pub max_depth: usize,

    /// URL handling for attribute values (default: strict).
    pub url_policy: UrlPolicy,

    /// Path prefix for form submission targets (default: /forms).
    pub form_action_base: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            url_policy: UrlPolicy::Strict,
            form_action_base: "/forms".to_string(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let max_depth = match env::var("RENDER_MAX_DEPTH") {
            Ok(v) => v
                .trim()
                .parse()
                .context("RENDER_MAX_DEPTH must be a valid unsigned integer")?,
            Err(_) => defaults.max_depth,
        };

        let url_policy = match env::var("RENDER_URL_POLICY") {
            Ok(v) => v.parse().context("RENDER_URL_POLICY is invalid")?,
            Err(_) => defaults.url_policy,
        };

        let form_action_base = env::var("RENDER_FORM_ACTION_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.form_action_base);

        Ok(Self {
            max_depth,
            url_policy,
            form_action_base,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_url_policy(mut self, url_policy: UrlPolicy) -> Self {
        self.url_policy = url_policy;
        self
    }
}
