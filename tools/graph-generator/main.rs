use clap::Parser;
use keiro::document::WorkflowDocument;
use keiro::graph::{GraphBuilder, NodeId, NodeKind};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random workflow graphs for the keiro validator and orchestrator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON document to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// Number of process nodes on the main path
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Probability that a process step is followed by a decision
    #[arg(long, default_value_t = 0.2)]
    decision_rate: f64,

    /// Number of nodes left without any edges (to exercise the validator)
    #[arg(long, default_value_t = 0)]
    orphans: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.decision_rate) {
        eprintln!(
            "Error: --decision-rate ({}) must be between 0 and 1",
            cli.decision_rate
        );
        std::process::exit(1);
    }

    println!(
        "Generating workflow ({} steps, decision rate {}, {} orphan(s))...",
        cli.steps, cli.decision_rate, cli.orphans
    );

    let mut builder = GraphBuilder::new();
    let decisions = generate_main_path(&mut builder, &mut rng, cli.steps, cli.decision_rate);
    for _ in 0..cli.orphans {
        builder.add_labeled_node(NodeKind::Process, "Orphan step");
    }
    let graph = builder.build();

    let document = WorkflowDocument::from_graph(&graph);
    fs::write(&cli.output, document.to_json_pretty()?)?;

    println!(
        "-> {} nodes, {} edges, {} decision(s).",
        graph.nodes.len(),
        graph.edges.len(),
        decisions
    );
    println!("Successfully generated and saved workflow to '{}'", cli.output);

    Ok(())
}

/// Builds `start -> step* -> end`, occasionally branching through a decision
/// whose "no" branch rejoins the path two steps later. Returns the number of
/// decisions placed.
fn generate_main_path(
    builder: &mut GraphBuilder,
    rng: &mut ThreadRng,
    steps: usize,
    decision_rate: f64,
) -> usize {
    let start = builder.add_node(NodeKind::Start);
    let mut previous: NodeId = start;
    let mut pending_rejoin: Vec<NodeId> = Vec::new();
    let mut decisions = 0;

    for index in 0..steps {
        let step = builder.add_labeled_node(NodeKind::Process, &format!("Step {}", index + 1));
        builder.connect(&previous, &step);
        for decision in pending_rejoin.drain(..) {
            builder.connect_via(&decision, "no", &step, "in");
        }
        previous = step;

        if rng.random_bool(decision_rate) {
            decisions += 1;
            let decision = builder.add_labeled_node(
                NodeKind::Decision,
                &format!("Check {}", rng.random_range(100..1000)),
            );
            builder.connect(&previous, &decision);
            // "yes" continues along the path, "no" rejoins at the following step.
            let yes = builder.add_labeled_node(NodeKind::Process, "Handle yes");
            builder.connect_via(&decision, "yes", &yes, "in");
            pending_rejoin.push(decision);
            previous = yes;
        }
    }

    let end = builder.add_node(NodeKind::End);
    builder.connect(&previous, &end);
    for decision in pending_rejoin.drain(..) {
        builder.connect_via(&decision, "no", &end, "in");
    }
    decisions
}
