//! Format registry: maps a format name to its plugin

use super::traits::FormatPlugin;
use crate::error::{PeywandError, Result};
use crate::import_export::{CsvPlugin, HtmlPlugin, JsonPlugin};
use log::{debug, info};
use std::collections::BTreeMap;

/// Lookup table from format name (case-sensitive) to plugin.
///
/// Built once at startup and handed to the command layer; there is no way to
/// unregister a format.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Box<dyn FormatPlugin>>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the html, json and csv plugins
    pub fn with_builtin_formats() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(HtmlPlugin))?;
        registry.register(Box::new(JsonPlugin))?;
        registry.register(Box::new(CsvPlugin))?;
        Ok(registry)
    }

    /// Register a plugin under its format name.
    ///
    /// A name can only be claimed once; a second registration is a configuration
    /// bug and fails instead of replacing the first plugin.
    pub fn register(&mut self, plugin: Box<dyn FormatPlugin>) -> Result<()> {
        let format = plugin.format().to_string();

        if self.plugins.contains_key(&format) {
            return Err(PeywandError::FormatAlreadyRegistered(format));
        }

        info!("Registering format '{}': {}", format, plugin.description());
        self.plugins.insert(format, plugin);
        Ok(())
    }

    /// Look up the plugin for `format`
    pub fn get(&self, format: &str) -> Result<&dyn FormatPlugin> {
        debug!("Resolving format '{}'", format);
        self.plugins
            .get(format)
            .map(|plugin| plugin.as_ref())
            .ok_or_else(|| PeywandError::UnknownFormat {
                format: format.to_string(),
                available: self.formats(),
            })
    }

    /// Registered format names, sorted
    pub fn formats(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    /// Registered plugins, sorted by format name
    pub fn plugins(&self) -> impl Iterator<Item = &dyn FormatPlugin> {
        self.plugins.values().map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
