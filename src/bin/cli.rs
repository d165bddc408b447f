// src/bin/cli.rs
use jarchive_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init("info");
    cli::run()
}
