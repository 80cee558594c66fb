use blockquill_config::{Config, default_storage_path};
use dioxus::prelude::*;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use ui::App;

/// Where to store content and which limit to start with
#[derive(Debug, Clone, PartialEq)]
struct Launch {
    storage_path: PathBuf,
    block_limit: Option<usize>,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("blockquill starting up!");

    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());

    let args: Vec<String> = env::args().collect();
    let launch = match resolve_launch(&args) {
        Ok(launch) => launch,
        Err(message) => {
            let program_name = args.first().map_or("blockquill", String::as_str);
            eprintln!("Error: {message}");
            eprintln!("Usage: {program_name} [storage-folder-path]");
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
    };

    if launch.storage_path.exists() && !launch.storage_path.is_dir() {
        eprintln!(
            "Error: Storage path '{}' is not a directory",
            launch.storage_path.display()
        );
        process::exit(1);
    }

    log::info!("Storing content in {}", launch.storage_path.display());
    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .launch(app_root);
}

/// CLI argument first, then the config file, then built in defaults
fn resolve_launch(args: &[String]) -> Result<Launch, String> {
    let config = Config::load().map_err(|e| format!("Failed to load config file: {e}"))?;
    launch_from(args, config)
}

fn launch_from(args: &[String], config: Option<Config>) -> Result<Launch, String> {
    let block_limit = config.as_ref().and_then(|c| c.block_limit);
    match args {
        [_] => Ok(Launch {
            storage_path: config.map_or_else(default_storage_path, |c| c.storage_path),
            block_limit,
        }),
        [_, path] => Ok(Launch {
            storage_path: PathBuf::from(path),
            block_limit,
        }),
        _ => Err("Too many arguments".to_string()),
    }
}

fn app_root() -> Element {
    // Re-resolve using the same logic as main, which already validated it
    let args: Vec<String> = env::args().collect();
    let launch = resolve_launch(&args).unwrap_or_else(|e| {
        log::error!("{e}; falling back to defaults");
        Launch {
            storage_path: default_storage_path(),
            block_limit: None,
        }
    });

    rsx! {
        App { storage_path: launch.storage_path, block_limit: launch.block_limit }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("blockquill")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
