// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use yatt::app_config::{self, Config, TranslationProvider};
use yatt::app_controller::{Command, CommandOutput, Controller, SpeakTarget};
use yatt::language_utils::Language;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text (or a file) and record it in the history
    Translate(TranslateArgs),

    /// Show the full translation history
    History,

    /// Show saved translations
    Saved,

    /// Star or unstar a translation, recording it first if needed
    Star {
        /// Text to star
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },

    /// Delete the whole translation history
    ClearHistory {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Unstar every saved translation
    ClearSaved,

    /// Read text aloud
    Speak {
        /// Text to speak
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },

    /// Dictate text in the source language and print the transcript
    Listen {
        /// Translate the transcript afterwards
        #[arg(long)]
        translate: bool,
    },

    /// Start the interactive translator shell (default command)
    Shell,

    /// Generate shell completions for yatt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    text: Vec<String>,

    /// Read the text to translate from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Write the translation to a file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Star the translation after recording it
    #[arg(long)]
    star: bool,
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// History database file
    #[arg(short, long, global = true, env = "YATT_DATABASE")]
    database: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, global = true, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Source language (ru, en, ja, de)
    #[arg(short, long, global = true)]
    source_language: Option<Language>,

    /// Target language (ru, en, ja, de)
    #[arg(short, long, global = true)]
    target_language: Option<Language>,
}

/// YATT - Yet Another Text Translator
///
/// Translates short texts between Russian, English, Japanese and German,
/// keeping a searchable history with starred entries.
#[derive(Parser, Debug)]
#[command(name = "yatt")]
#[command(version)]
#[command(about = "Text translator with persistent history")]
#[command(long_about = "YATT translates text and keeps every translation in a local history.

EXAMPLES:
    yatt                                   # Start the interactive shell
    yatt translate hello world             # Translate with the default languages
    yatt -s en -t ja translate good night  # Translate from English to Japanese
    yatt translate -f in.txt -o out.txt    # Translate a file
    yatt history                           # Show the history
    yatt star hello world                  # Star a translation
    yatt clear-history --yes               # Delete the history
    yatt completions bash > yatt.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOptions,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself accepts everything; filtering goes through max_level
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        print_completions(shell);
        return Ok(());
    }

    let config = load_config(&cli.global)?;
    let mut controller = Controller::with_config(config)?;

    let result = run_command(&mut controller, cli.command.unwrap_or(Commands::Shell)).await;

    // Close the store even when the command failed
    let closed = controller.shutdown();
    result.and(closed)
}

fn print_completions(shell: Shell) {
    let mut cmd = CommandLineOptions::command();
    generate(shell, &mut cmd, "yatt", &mut std::io::stdout());
}

fn load_config(options: &GlobalOptions) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(source) = options.source_language {
        config.source_language = source;
    }
    if let Some(target) = options.target_language {
        config.target_language = target;
    }
    if let Some(database) = &options.database {
        config.database_path = Some(database.clone());
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    debug!("Loaded configuration from {}", options.config_path);
    Ok(config)
}

/// Dispatch a command and print its visible result
async fn run_step(controller: &mut Controller, command: Command) -> CommandOutput {
    let output = controller.dispatch(command).await;
    let rendered = output.to_string();
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    output
}

async fn run_command(controller: &mut Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Translate(args) => {
            if let Some(path) = args.file {
                let opened = run_step(controller, Command::OpenFile(path.clone())).await;
                if opened == CommandOutput::Nothing {
                    return Err(anyhow!("Could not read {:?}", path));
                }
            }

            let text = (!args.text.is_empty()).then(|| args.text.join(" "));
            match run_step(controller, Command::Translate(text)).await {
                CommandOutput::Translation { .. } => {}
                CommandOutput::Blocked { length, max } => {
                    return Err(anyhow!("Input exceeds the symbol limit ({}/{})", length, max));
                }
                _ => return Err(anyhow!("Translation failed")),
            }

            if args.star {
                run_step(controller, Command::Star).await;
            }
            if let Some(output) = args.output {
                run_step(controller, Command::SaveFile(Some(output))).await;
            }
        }
        Commands::History => {
            run_step(controller, Command::ShowHistory).await;
        }
        Commands::Saved => {
            run_step(controller, Command::ShowSaved).await;
        }
        Commands::Star { text } => {
            controller.orchestrator_mut().set_input(text.join(" "));
            run_step(controller, Command::Save).await;
        }
        Commands::ClearHistory { yes } => {
            run_step(controller, Command::DeleteHistory { confirmed: yes }).await;
        }
        Commands::ClearSaved => {
            run_step(controller, Command::DeleteSaved).await;
        }
        Commands::Speak { text } => {
            controller.orchestrator_mut().set_input(text.join(" "));
            run_step(controller, Command::Speak(SpeakTarget::Input)).await;
        }
        Commands::Listen { translate } => {
            run_step(controller, Command::VoiceInput).await;
            if translate && !controller.orchestrator().input().is_empty() {
                run_step(controller, Command::Translate(None)).await;
            }
        }
        Commands::Shell => run_shell(controller).await?,
        Commands::Completions { shell } => print_completions(shell),
    }

    Ok(())
}

async fn run_shell(controller: &mut Controller) -> Result<()> {
    info!("{}  (:help for commands)", controller.status_line());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                error!("{}", e);
                continue;
            }
        };

        if run_step(controller, command).await == CommandOutput::Quit {
            break;
        }
    }

    Ok(())
}
