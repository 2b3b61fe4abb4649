use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let cfg = light_movements::config::Config::parse();
    light_movements::app::run(cfg)
}
