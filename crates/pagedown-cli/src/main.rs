use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

mod args;
mod collect;
mod paths;
mod settings;

use args::{Args, Command};
use collect::Collector;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match args.command {
        Command::Convert { file, url, options } => {
            let settings = settings::load(&options).context("failed to load configuration")?;
            let url = url
                .map(|u| Url::parse(&u).with_context(|| format!("invalid page URL: {}", u)))
                .transpose()?;

            let mut collector = Collector::new(&settings);
            let saved = collector.save_page(&file, url.as_ref(), &[])?;
            println!("{}", saved.display());
        }
        Command::Collect { dir, options } => {
            let settings = settings::load(&options).context("failed to load configuration")?;

            let mut collector = Collector::new(&settings);
            let saved = collector.save_dir(&dir)?;
            log::info!("converted {} pages from {}", saved.len(), dir.display());
            for path in saved {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
