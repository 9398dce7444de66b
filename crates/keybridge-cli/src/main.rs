use clap::{Parser, Subcommand};
use std::process;
use tracing::error;

mod catalogue;
mod cmd;
mod reports;

use catalogue::Catalogue;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert keyboard descriptors into BLE Micro Pro configuration records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Endpoint returning the JSON array of known keyboard names.
    #[arg(global = true, long, default_value = catalogue::KEYBOARD_LIST_URL)]
    api: String,

    /// Base endpoint for per-keyboard descriptor documents.
    #[arg(global = true, long, default_value = catalogue::KEYBOARD_INFO_BASE)]
    info: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List keyboards known to the remote catalogue.
    List(cmd::list::ListArgs),
    /// Show the layouts a keyboard descriptor defines.
    Layouts(cmd::layouts::LayoutsArgs),
    /// Convert a descriptor into configuration records.
    Convert(cmd::convert::ConvertArgs),
}

#[tokio::main]
async fn main() {
    // Keep stdout clean for record output; logs go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let catalogue = Catalogue::new(&cli.api, &cli.info);

    let result = match cli.command {
        Commands::List(args) => cmd::list::run(args, &catalogue).await,
        Commands::Layouts(args) => cmd::layouts::run(args, &catalogue).await,
        Commands::Convert(args) => cmd::convert::run(args, &catalogue).await,
    };

    if let Err(e) = result {
        error!("❌ {e:#}");
        process::exit(1);
    }
}
