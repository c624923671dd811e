// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Receipt printing for Finnish small businesses
#[derive(Parser)]
#[command(name = "kuitti", version, about)]
struct Cli {
    /// Override the application data directory
    #[arg(long, env = "KUITTI_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log filter, e.g. "info,kuitti=debug"
    #[arg(long, env = "RUST_LOG")]
    log_filter: Option<String>,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    if let Some(dir) = &cli.data_dir {
        std::env::set_var("KUITTI_DATA_DIR", dir);
    }
    if let Some(filter) = &cli.log_filter {
        std::env::set_var("RUST_LOG", filter);
    }

    kuitti_lib::run();
}
