use clap::Parser;
use flowc::prelude::*;

/// Translate visual flow graphs into executable workflows and delegate them
/// to an external engine, or query the status of the last run.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Execution directory: emitted artifacts and the run-status record go here
    #[arg(short = 'p', long = "path")]
    execution_path: String,

    /// Path to the .flow file to translate and run (run mode)
    #[arg(short = 'w', long = "workflow")]
    workflow_path: Option<String>,

    /// Print the state of the last run in the execution directory (status mode)
    #[arg(short = 's', long = "status")]
    status: bool,

    /// External CWL engine binary to delegate to
    #[arg(long, default_value = "cwl-runner")]
    engine: String,

    /// Delegate as a local task chain instead of invoking a CWL engine
    #[arg(long)]
    chain: bool,

    /// Job name used when submitting a task chain
    #[arg(long, default_value = "flow-job")]
    job_name: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.status {
        run_status(&cli);
    } else if cli.workflow_path.is_some() {
        run_workflow(&cli);
    } else {
        exit_with_error("Nothing to do: pass -w <flow file> to run a workflow or -s to query status.");
    }
}

/// Run mode: load the flow and delegate it through the selected front end.
fn run_workflow(cli: &Cli) {
    let workflow_path = cli.workflow_path.as_deref().unwrap_or_default();
    let flow = Flow::from_file(workflow_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {e}")));

    let result = if cli.chain {
        let mut engine = ChainEngine::new(&cli.execution_path, LocalShellClient::new());
        engine.execute(flow, &cli.job_name)
    } else {
        CwlEngine::new(&cli.execution_path, cli.engine.clone()).execute(flow)
    };

    if let Err(e) = result {
        exit_with_error(&format!("Workflow translation failed: {e}"));
    }
}

/// Status mode: read back the last recorded run state.
fn run_status(cli: &Cli) {
    let status = WorkflowStatus::new(&cli.execution_path);
    match status.load() {
        Ok(state) => println!("{state}"),
        Err(e) => exit_with_error(&format!("Failed to read run status: {e}")),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
