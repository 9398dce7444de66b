pub mod convert;
pub mod layouts;
pub mod list;

use crate::catalogue::Catalogue;
use anyhow::{Context, Result};
use clap::Args;
use keybridge_core::KeyboardDescriptor;
use std::fs;
use std::path::PathBuf;

/// Where a descriptor comes from: the remote catalogue or a local file.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct DescriptorSource {
    /// Keyboard name in the remote catalogue (e.g. "crkbd").
    pub keyboard: Option<String>,

    /// Read the descriptor from a local info.json instead.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl DescriptorSource {
    /// Printable identifier for log lines.
    pub fn display_name(&self) -> String {
        match (&self.keyboard, &self.file) {
            (Some(name), _) => name.clone(),
            (None, Some(path)) => path.display().to_string(),
            (None, None) => String::from("<none>"),
        }
    }

    pub async fn load(&self, catalogue: &Catalogue) -> Result<KeyboardDescriptor> {
        if let Some(path) = &self.file {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let descriptor = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid descriptor", path.display()))?;
            return Ok(descriptor);
        }
        let name = self
            .keyboard
            .as_deref()
            .context("a keyboard name or --file is required")?;
        catalogue.descriptor(name).await
    }
}
