//! CLI entry point for muxseq.

mod cli;

use std::path::Path;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use muxseq::config::load_settings;
use muxseq::driver::TmuxDriver;
use muxseq::engine::{Engine, EngineOptions};
use muxseq::runner;
use muxseq::script::load_script;
use muxseq::ui::{RenderSink, Renderer, StdinInput};

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_tracing(args.quiet);
    let code = run(args).await;
    std::process::exit(code);
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "muxseq=warn" } else { "muxseq=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

async fn run(args: cli::Args) -> i32 {
    if args.nothing_to_do() {
        eprintln!("{}", cli::Args::command().render_usage());
        return 0;
    }

    let mut settings = match load_settings(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            Renderer::new(!args.no_color, args.quiet).error(&e.to_string());
            return 1;
        }
    };
    if args.no_color {
        settings.display.color = false;
    }
    let renderer = Renderer::new(settings.display.color, args.quiet);

    let script_path = args.file.clone().unwrap_or_else(|| settings.run.script.clone());
    let script = match load_script(Path::new(&script_path)) {
        Ok(script) => script,
        Err(e) => {
            renderer.error(&format!("{script_path}: {e}"));
            return 1;
        }
    };

    let options = EngineOptions {
        default_session: args.session.clone().or(settings.run.default_session.clone()),
        interactive: args.interactive,
        extract_settle: settings.extract_settle(),
    };
    let driver = TmuxDriver::new(settings.tmux.binary.clone(), args.dry_run);
    let mut input = StdinInput::new(settings.display.color);
    let mut engine = Engine::new(&script, driver, &renderer, &mut input, options);

    if args.kill {
        runner::kill(&mut engine).await;
    }

    if args.list {
        let name = args.sequences().into_iter().next();
        if let Err(e) = runner::list(&script, name.as_deref(), &renderer) {
            renderer.error(&e.to_string());
            return 1;
        }
        return 0;
    }
    if args.run.is_none() {
        return 0;
    }
    match runner::run(&mut engine, &args.sequences()).await {
        Ok(code) => code,
        Err(e) => {
            renderer.error(&e.to_string());
            1
        }
    }
}
