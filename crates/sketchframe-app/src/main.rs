//! SketchFrame command line entry point.

use clap::Parser;
use sketchframe_app::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("starting {:?}", cli.command);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = sketchframe_app::run(cli, &mut stdout) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
