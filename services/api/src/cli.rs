use crate::demo::{run_demo, run_plan, run_simulate, DemoArgs, PlanArgs, SimulateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use induction_planner::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Induction Planner",
    about = "Plan daily fleet induction and compare what-if scenarios from the command line",
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
    /// Allocate a fleet snapshot file into service, standby, and maintenance
    Plan(PlanArgs),
    /// Apply a scenario file to a fleet snapshot and compare against the baseline
    Simulate(SimulateArgs),
    /// Plan a generated fleet and walk through a sample scenario
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
        Command::Plan(args) => run_plan(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["induction-planner"]).expect("parses");

        assert!(cli.command.is_none());
    }

    #[test]
    fn plan_accepts_seed_and_export_path() {
        let cli = Cli::try_parse_from([
            "induction-planner",
            "plan",
            "--fleet",
            "depot.csv",
            "--seed",
            "7",
            "--csv-out",
            "plan.csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Plan(args)) => {
                assert_eq!(args.fleet.to_str(), Some("depot.csv"));
                assert_eq!(args.seed, Some(7));
                assert!(args.constraints.is_none());
                assert_eq!(args.csv_out.as_deref().and_then(|p| p.to_str()), Some("plan.csv"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn simulate_requires_a_scenario() {
        let result = Cli::try_parse_from(["induction-planner", "simulate", "--fleet", "depot.json"]);

        assert!(result.is_err());
    }
}
