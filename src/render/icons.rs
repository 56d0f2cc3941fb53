//! Decorative L2 icons, loaded on a best-effort basis
//!
//! A missing or broken icon index never affects gameplay: every lookup then
//! answers `IconLookup::Fallback` and the scene draws plain shapes.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// A resolved icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconHandle {
    pub glyph: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconLookup {
    Image(IconHandle),
    Fallback,
}

/// Source of icons keyed by L2 identity
pub trait IconSource {
    fn resolve(&self, identity: &str) -> IconLookup;
}

/// Identity to glyph table read from a JSON object
#[derive(Debug, Clone, Default)]
pub struct IconIndex {
    icons: HashMap<String, IconHandle>,
}

impl IconIndex {
    /// Index with no icons; everything falls back
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `{ "Arbitrum": "A", ... }`; entries with an empty glyph are skipped
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, String> =
            serde_json::from_str(text).context("Icon index is not a JSON object of strings")?;
        let icons = raw
            .into_iter()
            .filter_map(|(identity, glyph)| {
                glyph
                    .chars()
                    .next()
                    .map(|glyph| (identity, IconHandle { glyph }))
            })
            .collect();
        Ok(Self { icons })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read icon index {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Load the index if there is one, falling back to no icons on any error
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::empty();
        };
        match Self::load(path) {
            Ok(index) => {
                debug!(icons = index.len(), "icon index loaded");
                index
            }
            Err(e) => {
                warn!("Icon index unavailable, drawing plain shapes: {:#}", e);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl IconSource for IconIndex {
    fn resolve(&self, identity: &str) -> IconLookup {
        self.icons
            .get(identity)
            .copied()
            .map_or(IconLookup::Fallback, IconLookup::Image)
    }
}
