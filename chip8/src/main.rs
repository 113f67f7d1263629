use clap::Parser;

mod config;
mod keymap;
mod run;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = config::Args::parse();
    let settings = config::Settings::resolve(args)?;
    run::run(settings)
}
