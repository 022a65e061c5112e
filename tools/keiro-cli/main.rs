use ahash::AHashMap;
use clap::{Args, Parser, Subcommand};
use keiro::execution::create_event_channel;
use keiro::prelude::*;
use std::fs;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Validate and simulate workflow graphs exported by the editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report structural issues in a workflow
    Validate(InputArgs),
    /// Print the order in which a run would visit the nodes
    Order(InputArgs),
    /// Simulate a run, printing each step as it happens (Ctrl-C cancels)
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Path to the workflow JSON document
    workflow_path: String,

    /// Emit machine-readable JSON lines instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Simulated work per step, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Refuse to run when validation reports any error
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Order(args) => run_order(args),
        Command::Run(args) => run_simulation(args),
    }
}

/// Loads and normalizes a workflow document from disk.
fn load_graph(path: &str) -> Graph {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read workflow file '{}': {}", path, e))
    });
    WorkflowDocument::from_json(&json)
        .and_then(IntoGraph::into_graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load workflow: {}", e)))
}

fn run_validate(args: InputArgs) {
    let graph = load_graph(&args.workflow_path);
    let report = validate(&graph);

    if args.json {
        for issue in report.issues() {
            print_json(issue);
        }
    } else if report.is_empty() {
        println!("Workflow validation passed! All checks completed successfully.");
    } else {
        println!("Found {} issue(s):", report.len());
        for issue in report.issues() {
            println!("  - {}", issue);
        }
    }

    if report.has_errors() {
        std::process::exit(1);
    }
}

fn run_order(args: InputArgs) {
    let graph = load_graph(&args.workflow_path);
    let order = execution_order(&graph);

    if args.json {
        print_json(&order);
        return;
    }
    if order.is_empty() {
        println!("No nodes to execute.");
        return;
    }
    for (index, node_id) in order.iter().enumerate() {
        println!("{:>3}. {}", index + 1, describe(&graph, node_id));
    }
    let skipped = graph.nodes.len().saturating_sub(order.len());
    if skipped > 0 {
        println!("({} node(s) unreachable from the start node are skipped)", skipped);
    }
}

fn run_simulation(args: RunArgs) {
    let graph = load_graph(&args.input.workflow_path);

    let report = validate(&graph);
    if report.has_errors() {
        for issue in report.issues() {
            eprintln!("  - {}", issue);
        }
        if args.strict {
            exit_with_error("Workflow has validation errors; refusing to run in strict mode.");
        }
        eprintln!("Warning: running a workflow with validation errors.");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to start runtime: {}", e)));

    runtime.block_on(async move {
        let (sender, mut events) = create_event_channel();
        let mut orchestrator = Orchestrator::builder()
            .with_delay(DelayChoice::Fixed(Duration::from_millis(args.delay_ms)))
            .with_observer(sender)
            .build();

        let cancel = orchestrator.cancel_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nCancellation requested, finishing the current step...");
                cancel.cancel();
            }
        });

        let labels: AHashMap<String, String> = graph
            .nodes
            .iter()
            .map(|node| (node.id.clone(), describe(&graph, &node.id)))
            .collect();
        let json = args.input.json;
        let printer = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if json {
                    print_json(&event);
                    continue;
                }
                match &event {
                    ExecutionEvent::StepStarted {
                        node_id,
                        index,
                        total,
                    } => {
                        let name = labels.get(node_id).map_or(node_id.as_str(), String::as_str);
                        println!("[{}/{}] Executing: {}", index + 1, total, name);
                    }
                    ExecutionEvent::StepCompleted { progress, .. } => {
                        println!("        done ({}%)", progress);
                    }
                    ExecutionEvent::RunCompleted => {
                        println!("Workflow execution completed successfully!");
                    }
                    ExecutionEvent::RunCancelled => {
                        println!("Execution cancelled by user.");
                    }
                }
            }
        });

        println!("Starting workflow execution...");
        let started = Instant::now();
        let outcome = orchestrator
            .run(&graph)
            .await
            .unwrap_or_else(|e| exit_with_error(&format!("Run failed: {}", e)));
        let state = orchestrator.state().clone();
        drop(orchestrator);
        if let Err(e) = printer.await {
            eprintln!("Error: event printer failed: {}", e);
        }

        println!("\n--- Run Summary ---");
        println!("Outcome:          {:?}", outcome);
        println!(
            "Completed Nodes:  {} / {}",
            state.completed_node_ids().len(),
            state.total()
        );
        println!("Progress:         {}%", state.progress());
        println!("Elapsed:          {:?}", started.elapsed());
    });
}

/// Formats a node as `label (kind)`, falling back to the bare id.
fn describe(graph: &Graph, node_id: &str) -> String {
    match graph.node_by_id(node_id) {
        Ok(node) => format!("{} ({})", node.display_name(), node.kind),
        Err(_) => node_id.to_string(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
