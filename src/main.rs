//! `meshview` binary: open a model in a window, framed to fit.

use clap::Parser;
use meshview::{cli::Cli, Viewer};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = match cli.resolve_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    let mut builder = Viewer::builder()
        .with_model(cli.model.clone())
        .with_options(options)
        .with_title(cli.title.clone());
    if let Some(env) = &cli.env {
        builder = builder.with_environment(env.clone());
    }
    if let Some(frames) = cli.frames {
        builder = builder.with_frame_limit(frames);
    }

    match builder.build().run() {
        Ok(reason) => log::info!("viewer exited: {reason}"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
