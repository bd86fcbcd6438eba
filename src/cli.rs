//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use clap_complete::generate;

use crate::core::settings::FontMode;

const AFTER_HELP: &str = "\
EXAMPLES:
  bionic-reader bionic \"Hello world!\"        Bionic rendering with ANSI emphasis
  bionic-reader bionic --json \"Hello\"        Word-by-word split as JSON
  bionic-reader strip - < notes.md           Strip markdown, keep **bold** and code
  bionic-reader render --mode bionic -       Render stdin as a chat message
  bionic-reader check \"# Title\"              Exit 0 if the text has markdown
  bionic-reader view notes.md                Open the terminal reader
  bionic-reader config set font-mode bionic  Save a reading setting
  bionic-reader completions bash             Generate bash completions

Use '-' as TEXT to read from stdin.
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Bionic reading for plain text and markdown",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Text argument shared by the text commands.
#[derive(ClapArgs)]
pub struct TextInput {
    /// Text to process, or '-' to read from stdin
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// When to emit ANSI colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    Always,
    Never,
}

/// Font mode override on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Standard,
    Bionic,
}

impl From<ModeArg> for FontMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standard => FontMode::Standard,
            ModeArg::Bionic => FontMode::Bionic,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split every word into an emphasized prefix and the rest.
    /// Without colour the prefixes are marked as **Hel**lo
    Bionic {
        #[command(flatten)]
        input: TextInput,
        /// Print the word list as JSON instead of rendering it
        #[arg(long)]
        json: bool,
        #[arg(long, value_enum, default_value_t)]
        color: ColorChoice,
    },
    /// Strip markdown while keeping **bold** spans and code verbatim
    Strip {
        #[command(flatten)]
        input: TextInput,
        /// Keep only fenced code blocks verbatim (strip bold too)
        #[arg(long)]
        keep_code_only: bool,
    },
    /// Print the bold/code/normal segments as JSON
    Segments {
        #[command(flatten)]
        input: TextInput,
    },
    /// Render text as a chat message in the configured font mode
    Render {
        #[command(flatten)]
        input: TextInput,
        /// Override the configured font mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(long, value_enum, default_value_t)]
        color: ColorChoice,
    },
    /// Exit 0 if the text contains markdown formatting, 1 otherwise
    Check {
        #[command(flatten)]
        input: TextInput,
    },
    /// Print bionic statistics as JSON
    Stats {
        #[command(flatten)]
        input: TextInput,
    },
    /// Open a file (or stdin) in the terminal reader
    View {
        /// File to read, or '-' for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        file: String,
        /// Override the configured font mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Show or change reading settings
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show settings, themes, and the settings file path
    Show,
    /// Set one setting (font-mode, color-theme, heading-color, subheading-color, body-color)
    Set { key: String, value: String },
    /// Restore default settings
    Reset,
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when the command takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::View { .. })
    }
}
