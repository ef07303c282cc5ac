//! # Stockroom Admin
//!
//! ## Usage
//! ```bash
//! # Print a summary of the demo store (default)
//! cargo run -p stockroom-admin
//!
//! # Seed from a snapshot file and write a backup
//! STOCKROOM_FIXTURES=./seed.json cargo run -p stockroom-admin -- export
//!
//! # Restore a backup and show the result
//! cargo run -p stockroom-admin -- restore ./backups/backup-stockroom-....json
//! ```

use std::env;
use std::path::PathBuf;

use stockroom_admin::state::AdminConfig;
use stockroom_admin::{init_tracing, run, Mode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mode = match args.get(1).map(String::as_str) {
        None | Some("summary") => Mode::Summary,
        Some("export") => Mode::Export,
        Some("restore") => match args.get(2) {
            Some(path) => Mode::Restore(PathBuf::from(path)),
            None => {
                eprintln!("restore needs a backup file path");
                std::process::exit(2);
            }
        },
        Some("--help") | Some("-h") => {
            println!("Stockroom admin");
            println!();
            println!("Usage: stockroom-admin [COMMAND]");
            println!();
            println!("Commands:");
            println!("  summary          Show store counts, low stock and audit (default)");
            println!("  export           Write a backup file to STOCKROOM_BACKUP_DIR");
            println!("  restore <FILE>   Restore the store from a backup file");
            return Ok(());
        }
        Some(other) => {
            eprintln!("unknown command '{other}', try --help");
            std::process::exit(2);
        }
    };

    init_tracing();

    let config = AdminConfig::from_env()?;
    run(config, mode).await?;

    Ok(())
}
