use clap::{Parser, Subcommand};
use std::io::Write;

use tempo::commands::{self, RunArgs};
use tempo::{CliContext, LineReader, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    logging::init();

    // the timer ticks on local tasks, so the REPL runs inside a LocalSet
    tokio::task::LocalSet::new().run_until(run()).await
}

async fn run() -> Result<(), String> {
    let ctx = CliContext::new();
    let mut reader = LineReader::stdin();

    while let Some(line) = reader.readline().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx) {
            Ok(quit) => {
                if quit {
                    return Ok(());
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    // end of input
    commands::exit(&ctx);
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "tempo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the timer
    Start {
        /// Saved preset to start from; explicit options override it
        #[arg(long)]
        preset: Option<String>,
        #[command(flatten)]
        run: RunArgs,
    },
    Stop,
    Status,
    Config,
    Presets,
    SavePreset {
        #[arg(short, long)]
        name: String,
        #[command(flatten)]
        run: RunArgs,
    },
    DeletePreset {
        #[arg(short, long)]
        name: String,
    },
    Exit,
}

fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "tempo".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Start { preset, run }) => commands::start(ctx, preset.as_deref(), run)?,
        Some(Commands::Stop) => commands::stop(ctx)?,
        Some(Commands::Status) => commands::status(ctx)?,
        Some(Commands::Config) => commands::show_config(ctx)?,
        Some(Commands::Presets) => commands::list_presets(ctx)?,
        Some(Commands::SavePreset { name, run }) => commands::save_preset(ctx, name, run)?,
        Some(Commands::DeletePreset { name }) => commands::delete_preset(ctx, name)?,
        Some(Commands::Exit) => {
            commands::exit(ctx);
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
