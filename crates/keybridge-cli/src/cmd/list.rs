use crate::catalogue::Catalogue;
use anyhow::Result;
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive substring to filter names by.
    #[arg(short, long)]
    pub filter: Option<String>,
}

pub async fn run(args: ListArgs, catalogue: &Catalogue) -> Result<()> {
    let names = catalogue.keyboard_names().await?;
    let total = names.len();

    let needle = args.filter.as_deref().map(str::to_lowercase);
    let mut shown = 0usize;
    for name in names {
        let keep = needle
            .as_deref()
            .map_or(true, |needle| name.to_lowercase().contains(needle));
        if keep {
            println!("{name}");
            shown += 1;
        }
    }

    info!("📋 Listed {shown} of {total} keyboards");
    Ok(())
}
