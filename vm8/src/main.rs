use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

mod args;
mod audio;
mod keymap;
mod run;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = args::Args::parse();
    let level = if args.debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    run::run(&args)
}
