use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use serde::Deserialize;
use structopt::StructOpt;

use menucard::session::Session;

#[derive(Debug, StructOpt)]
#[structopt(name = "rb", about = "Record a restaurant menu")]
struct Opt {
    /// Configuration file (TOML)
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "session", about = "Read menu commands from stdin")]
    Session,
}

#[derive(Deserialize, Debug, Default)]
struct Config {
    #[serde(flatten)]
    menucard: menucard::config::Config,
    #[serde(default)]
    env_logger: menucard::config::EnvLogger,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let config: Config = match opt.config.as_ref() {
        Some(path) => {
            let buf = fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
            toml::from_str(&buf).with_context(|| format!("parse {:?}", path))?
        }
        None => Config::default(),
    };

    config.env_logger.builder().init();
    debug!("Options: {:?}", opt);

    let menucard = config.menucard.with_env_overrides()?;
    debug!("Config: {:?}", menucard);

    match opt.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(&menucard, stdout.lock());
            session.run(stdin.lock())?;
            info!("Session over with {} items", session.card().menu().len());
        }
    }

    Ok(())
}
