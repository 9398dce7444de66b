use super::DescriptorSource;
use crate::catalogue::Catalogue;
use anyhow::Result;
use clap::Args;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use tracing::info;

#[derive(Args, Debug)]
pub struct LayoutsArgs {
    #[command(flatten)]
    pub source: DescriptorSource,
}

pub async fn run(args: LayoutsArgs, catalogue: &Catalogue) -> Result<()> {
    let descriptor = args.source.load(catalogue).await?;

    let mut layouts: Vec<_> = descriptor.layouts.iter().collect();
    layouts.sort_by(|a, b| a.0.cmp(b.0));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Keys"),
    ]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    for (name, entry) in &layouts {
        table.add_row(vec![Cell::new(name), Cell::new(entry.layout.len())]);
    }
    println!("{table}");

    info!(
        "⌨️ {} layouts in '{}'",
        layouts.len(),
        args.source.display_name()
    );
    Ok(())
}
