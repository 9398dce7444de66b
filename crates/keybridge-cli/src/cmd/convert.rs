use super::DescriptorSource;
use crate::catalogue::Catalogue;
use crate::reports;
use anyhow::{bail, Context, Result};
use clap::Args;
use keybridge_core::{compile, KeyboardDescriptor};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: DescriptorSource,

    /// Layout to convert; optional when the descriptor defines exactly one.
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Write one `<variant>.json` per record into this directory instead of
    /// printing.
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

pub async fn run(args: ConvertArgs, catalogue: &Catalogue) -> Result<()> {
    let descriptor = args.source.load(catalogue).await?;
    let layout = choose_layout(&descriptor, args.layout.as_deref())?;

    info!(
        "🔧 Converting '{}' with layout '{layout}'",
        args.source.display_name()
    );
    let variants = compile(&descriptor, &layout)?;

    if let Some(dir) = &args.out {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        for (variant, record) in variants.iter() {
            let path = dir.join(format!("{variant}.json"));
            fs::write(&path, record)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("💾 Wrote {}", path.display());
        }
    } else {
        for (variant, record) in variants.iter() {
            println!("=== {variant} ===");
            println!("{}", reports::format_record(record));
        }
    }

    Ok(())
}

fn choose_layout(descriptor: &KeyboardDescriptor, requested: Option<&str>) -> Result<String> {
    if let Some(name) = requested {
        return Ok(name.to_string());
    }
    let mut names: Vec<_> = descriptor.layouts.keys().cloned().collect();
    names.sort();
    match names.as_slice() {
        [only] => Ok(only.clone()),
        [] => bail!("descriptor defines no layouts"),
        _ => bail!(
            "descriptor defines {} layouts, pick one with --layout: {}",
            names.len(),
            names.join(", ")
        ),
    }
}
