//! Client for the public keyboard catalogue.

use anyhow::{anyhow, Context, Result};
use keybridge_core::KeyboardDescriptor;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Directory of every keyboard the catalogue knows about.
pub const KEYBOARD_LIST_URL: &str = "https://api.qmk.fm/v1/keyboards";

/// Per-keyboard descriptor documents live under `<base>/<name>/info.json`.
pub const KEYBOARD_INFO_BASE: &str = "https://keyboards.qmk.fm/v1/keyboards";

/// Descriptor documents arrive wrapped in a one-entry `keyboards` map.
#[derive(Debug, Deserialize)]
struct InfoEnvelope {
    keyboards: HashMap<String, KeyboardDescriptor>,
}

pub struct Catalogue {
    client: Client,
    list_url: String,
    info_base: String,
}

impl Catalogue {
    pub fn new(list_url: &str, info_base: &str) -> Self {
        Self {
            client: Client::new(),
            list_url: list_url.to_string(),
            info_base: info_base.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the names of all catalogued keyboards.
    pub async fn keyboard_names(&self) -> Result<Vec<String>> {
        debug!("fetching keyboard list from {}", self.list_url);
        let names = self
            .client
            .get(&self.list_url)
            .send()
            .await
            .context("failed to reach the keyboard catalogue")?
            .error_for_status()
            .context("keyboard catalogue returned an error")?
            .json::<Vec<String>>()
            .await
            .context("keyboard list is not a JSON array of names")?;
        Ok(names)
    }

    /// Fetch and unwrap one keyboard's descriptor document.
    pub async fn descriptor(&self, name: &str) -> Result<KeyboardDescriptor> {
        let url = format!("{}/{}/info.json", self.info_base, name);
        debug!("fetching descriptor from {url}");
        let mut envelope = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch the descriptor for '{name}'"))?
            .error_for_status()
            .with_context(|| format!("catalogue has no descriptor for '{name}'"))?
            .json::<InfoEnvelope>()
            .await
            .with_context(|| format!("descriptor document for '{name}' is not valid JSON"))?;
        envelope
            .keyboards
            .remove(name)
            .ok_or_else(|| anyhow!("descriptor envelope does not contain '{name}'"))
    }
}
