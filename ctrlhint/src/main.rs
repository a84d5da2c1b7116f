use crate::config::preset;
use crate::errors::HintError;
use crate::presenter::TerminalPresenter;
use clap::{Arg, ArgAction, ArgMatches, Command as App};
use ctrlhint_core::config::{Command, Config as _, command};
use ctrlhint_core::hook::evdev::EvdevSource;
use ctrlhint_core::ipc::Pipe;
use ctrlhint_core::worker::{Status, Worker};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use xdg::BaseDirectories;

use tracing_subscriber::{filter::EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt};

pub mod config;
pub mod errors;
pub mod presenter;

const QUIT_COMMAND: &str = "quit";
const RELOAD_COMMAND: &str = "reload";
const RESET_COMMAND: &str = "reset";
const PRESET_COMMAND: &str = "preset";
const CHECK_COMMAND: &str = "check";
const DEVICE_ARG: &str = "device";

fn main() {
    setup_logging();
    let matches = get_app().get_matches();
    tracing::info!("ctrlhint booted!");

    if matches.get_flag(QUIT_COMMAND) {
        send_command(&command::Kill);
    } else if matches.get_flag(RELOAD_COMMAND) {
        send_command(&command::Reload);
    } else if matches.get_flag(RESET_COMMAND) {
        send_command(&command::ResetState);
    } else if let Some(name) = matches.get_one::<String>(PRESET_COMMAND) {
        apply_preset(name);
    } else if matches.get_flag(CHECK_COMMAND) {
        check_config();
    } else {
        run(source(&matches));
    }
}

fn run(source: EvdevSource) {
    let path =
        errors::exit_on_error!(BaseDirectories::with_prefix(ctrlhint_core::CTRLHINT_DIR_NAME));
    let pipe_file = errors::exit_on_error!(path.place_runtime_file(Pipe::pipe_name()));
    let mut old_config = None;
    loop {
        let config = match config::load() {
            Ok(config) => config,
            Err(err) => match old_config {
                Some(config) => {
                    tracing::error!("Keeping previous config, new one failed: {}", err);
                    config
                }
                None => {
                    tracing::error!("Unable to load config, using defaults: {}", err);
                    config::Config::default()
                }
            },
        };
        let kill_requested = AtomicBool::new(false);
        let completed = std::panic::catch_unwind(|| {
            let rt = errors::return_on_error!(tokio::runtime::Runtime::new());
            let _rt_guard = rt.enter();

            let worker = Worker::new(
                config.hint_board(),
                source.clone(),
                TerminalPresenter::new(std::io::stdout()),
                pipe_file.clone(),
            );
            let status = rt.block_on(worker.event_loop());
            kill_requested.store(status == Status::Kill, Ordering::SeqCst);
        });

        match completed {
            Ok(()) => tracing::info!("Completed"),
            Err(err) => tracing::error!("Completed with error: {:?}", err),
        }
        if kill_requested.load(Ordering::SeqCst) {
            return;
        }
        old_config = Some(config);
    }
}

fn source(matches: &ArgMatches) -> EvdevSource {
    matches
        .get_many::<PathBuf>(DEVICE_ARG)
        .map(|paths| EvdevSource::with_paths(paths.cloned().collect()))
        .unwrap_or_default()
}

fn send_command(command: &impl Command) {
    let path =
        errors::exit_on_error!(BaseDirectories::with_prefix(ctrlhint_core::CTRLHINT_DIR_NAME));
    let pipe_file = errors::exit_on_error!(path.place_runtime_file(Pipe::pipe_name()));
    if !pipe_file.exists() {
        tracing::error!("No running daemon found at {}", pipe_file.display());
        std::process::exit(1);
    }
    let mut pipe = errors::exit_on_error!(fs::OpenOptions::new().write(true).open(&pipe_file));
    errors::exit_on_error!(writeln!(pipe, "{}", command.normalize()));
    tracing::info!("Sent {}", command.get_name());
}

fn apply_preset(name: &str) {
    let appearance = errors::exit_on_error!(preset::preset(name));
    let mut config = errors::exit_on_error!(config::load());
    config.appearance = appearance;
    errors::exit_on_error!(config::save(&config));
    tracing::info!("Applied preset `{}`, reload a running daemon to see it", name);
}

fn check_config() {
    let file_name = errors::exit_on_error!(config::config_file());
    let config = errors::exit_on_error!(config::load_from(&file_name));
    for chord in ctrlhint_core::chord::Chord::ALL {
        tracing::info!("{}: {} shortcuts", chord, config.shortcuts.get(chord).len());
    }
    tracing::info!("{} is valid", file_name.display());
}

fn get_app() -> App {
    clap::command!()
        .arg(
            Arg::new(QUIT_COMMAND)
                .short('q')
                .long(QUIT_COMMAND)
                .action(ArgAction::SetTrue)
                .help("Quit a running daemon instance"),
        )
        .arg(
            Arg::new(RELOAD_COMMAND)
                .short('r')
                .long(RELOAD_COMMAND)
                .action(ArgAction::SetTrue)
                .help("Reload daemon to apply changes to config"),
        )
        .arg(
            Arg::new(RESET_COMMAND)
                .short('R')
                .long(RESET_COMMAND)
                .action(ArgAction::SetTrue)
                .help("Forget held modifiers in a running daemon"),
        )
        .arg(
            Arg::new(PRESET_COMMAND)
                .long(PRESET_COMMAND)
                .value_name("NAME")
                .value_parser(preset::PRESET_NAMES)
                .help("Write an appearance preset into the config file"),
        )
        .arg(
            Arg::new(CHECK_COMMAND)
                .long(CHECK_COMMAND)
                .action(ArgAction::SetTrue)
                .help("Validate the config file and exit"),
        )
        .arg(
            Arg::new(DEVICE_ARG)
                .short('d')
                .long(DEVICE_ARG)
                .value_name("PATH")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read keys from this event device instead of every keyboard"),
        )
}

fn setup_logging() {
    let subscriber = fmt::Layer::new().with_writer(std::io::stderr);
    let log_level = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let collector = tracing_subscriber::registry()
        .with(log_level)
        .with(subscriber);

    if let Err(err) = tracing::subscriber::set_global_default(collector) {
        eprintln!("Couldn't setup logging: {err}");
    }
}
