use crate::demo::{run_demo, run_fit, run_steps, DemoArgs, FitArgs, StepsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use shaftfit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Shaft Fit",
    about = "Run the shaft fitting engine as a service or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute a fit summary from an answers snapshot
    Fit(FitArgs),
    /// List the wizard steps asked for a focus
    Steps(StepsArgs),
    /// Walk the wizard through a scripted golfer, including e-mail verification and resume
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Fit(args) => run_fit(args),
        Command::Steps(args) => {
            run_steps(args);
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
