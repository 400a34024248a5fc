use clap::{Parser, Subcommand};
use evalview_core::cli::{self, ViewArgs};
use evalview_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "evalview",
    version,
    about = "evalview: read, convert and serve evaluation logs",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(flatten)]
    view: ViewArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the log viewer (default)
    View(ViewArgs),

    /// Query, read, and convert logs
    Log {
        #[command(subcommand)]
        cmd: cli::log::LogCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Log { cmd }) => {
            init_logging("warn");
            cli::log::run(cmd)
        }

        Some(Command::View(args)) => {
            init_logging("info");
            cli::view(args)
        }

        None => {
            init_logging("info");
            cli::view(cli.view)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
