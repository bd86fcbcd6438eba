//! Application run modes: logger init, command dispatch, reader launch.

use std::io;
use std::path::Path;

use clap::CommandFactory;

use crate::cli::{Args, ColorChoice, Commands, ConfigSubcommand, generate};
use crate::core;
use crate::core::cli as commands;
use crate::core::compose::compose_message;
use crate::core::config::Config;
use crate::core::settings::FontMode;
use crate::tui::{self, Document};

/// Initialize env_logger. In reader mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_interactive() {
        let log_path = core::paths::cache_dir().map(|d| d.join(format!("{}.log", core::app::NAME)));
        if let Some(path) = log_path
            && std::fs::create_dir_all(path.parent().unwrap_or(Path::new("."))).is_ok()
            && let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

fn color_flag(choice: ColorChoice) -> Option<bool> {
    match choice {
        ColorChoice::Auto => None,
        ColorChoice::Always => Some(true),
        ColorChoice::Never => Some(false),
    }
}

/// Run the parsed command.
pub async fn dispatch(args: Args, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Commands::Bionic { input, json, color } => {
            let text = commands::input_or_exit(&input.text);
            let palette = commands::stdout_palette(&config, color_flag(color));
            commands::run_bionic(&text, json, palette.as_ref());
        }
        Commands::Strip {
            input,
            keep_code_only,
        } => {
            let text = commands::input_or_exit(&input.text);
            commands::run_strip(&config, &text, keep_code_only).await;
        }
        Commands::Segments { input } => {
            commands::run_segments(&commands::input_or_exit(&input.text));
        }
        Commands::Render { input, mode, color } => {
            let text = commands::input_or_exit(&input.text);
            let mode = mode.map_or(config.settings.font_mode, FontMode::from);
            let palette = commands::stdout_palette(&config, color_flag(color));
            commands::run_render(&config, &text, mode, palette.as_ref()).await;
        }
        Commands::Check { input } => {
            commands::run_check(&commands::input_or_exit(&input.text));
        }
        Commands::Stats { input } => {
            commands::run_stats(&commands::input_or_exit(&input.text));
        }
        Commands::View { file, mode } => {
            let text = commands::file_or_exit(&file);
            let title = if file == "-" {
                "stdin".to_string()
            } else {
                Path::new(&file)
                    .file_name()
                    .map_or_else(|| file.clone(), |n| n.to_string_lossy().into_owned())
            };
            let start = mode.map_or(config.settings.font_mode, FontMode::from);
            let doc = compose_document(&config, title, &text).await;
            let end = launch_reader(doc, start).await?;
            if mode.is_none() && end != config.settings.font_mode {
                commands::save_font_mode(end);
            }
        }
        Commands::Config { subcommand } => match subcommand {
            None | Some(ConfigSubcommand::Show) => commands::run_config_show(&config),
            Some(ConfigSubcommand::Set { key, value }) => commands::run_config_set(&key, &value),
            Some(ConfigSubcommand::Reset) => commands::run_config_reset(),
        },
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            generate(shell, &mut cmd, core::app::NAME, &mut io::stdout());
        }
    }
    Ok(())
}

/// Compose the document in both font modes up front.
async fn compose_document(config: &Config, title: String, text: &str) -> Document {
    let stripper = config.stripper();
    let standard = compose_message(text, FontMode::Standard, &stripper).await;
    let bionic = compose_message(text, FontMode::Bionic, &stripper).await;
    Document {
        title,
        standard,
        bionic,
        palette: config.settings.palette(),
    }
}

/// Launch the reader in a blocking thread. Returns the font mode at exit.
pub async fn launch_reader(
    doc: Document,
    mode: FontMode,
) -> Result<FontMode, Box<dyn std::error::Error>> {
    let join_result: Result<io::Result<FontMode>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || tui::run(doc, mode)).await;

    match join_result {
        Ok(io_result) => Ok(io_result?),
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("Reader panic: {}", msg);
            }
            Err(Box::new(io::Error::other("Reader thread panicked")) as Box<dyn std::error::Error>)
        }
    }
}
