use clap::{Parser, Subcommand};
use slideflow::prelude::*;
use slideflow::tree::{self, LayoutConfig, WorkflowData};
use std::path::PathBuf;

/// Inspect persisted slideflow workflows and decision graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the first/last core step rule and support relations of a workflow
    Validate {
        /// Path to a project workflow JSON file
        workflow_path: PathBuf,
    },
    /// Migrate a legacy workflow to unified steps and print the result
    Migrate {
        /// Path to a project workflow JSON file
        workflow_path: PathBuf,
    },
    /// Lay out a decision graph and print its nodes and edges
    Layout {
        /// Path to a decision graph JSON file
        graph_path: PathBuf,
        /// Optional layout configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let output = match cli.command {
        Command::Validate { workflow_path } => run_validate(&workflow_path),
        Command::Migrate { workflow_path } => run_migrate(&workflow_path),
        Command::Layout { graph_path, config } => run_layout(&graph_path, config.as_deref()),
    };

    match output.and_then(|value| Ok(serde_json::to_string_pretty(&value)?)) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn run_validate(path: &std::path::Path) -> Result<serde_json::Value> {
    let data = migrate_to_unified_steps(&ProjectWorkflowData::from_file(path)?);
    let steps = sorted_unified_steps(&data);
    let structure = validate_first_last_core(&steps);

    let dangling: Vec<&str> = data
        .support_relations
        .iter()
        .filter(|r| validate_support_creation(&r.supporter_step_id, &r.target_step_id, &data.steps, &[]).is_some())
        .map(|r| r.id.as_str())
        .collect();

    Ok(serde_json::json!({
        "steps": steps.len(),
        "isValid": structure.is_valid && dangling.is_empty(),
        "errorMessage": structure.error_message,
        "invalidSupportRelations": dangling,
        "mainFlowSteps": get_main_flow_steps(&data.steps, &data.support_relations).len(),
    }))
}

fn run_migrate(path: &std::path::Path) -> Result<serde_json::Value> {
    let data = ProjectWorkflowData::from_file(path)?;
    let migrated = sync_unified_to_legacy(&migrate_to_unified_steps(&data));
    Ok(serde_json::to_value(&migrated)?)
}

fn run_layout(path: &std::path::Path, config_path: Option<&std::path::Path>) -> Result<serde_json::Value> {
    let graph = WorkflowData::from_file(path)?;
    let config = match config_path {
        Some(config_path) => LayoutConfig::from_file(config_path)?,
        None => LayoutConfig::default(),
    };

    let nodes = tree::workflow_to_nodes(&graph, &config);
    let edges = tree::workflow_to_edges(&graph);
    Ok(serde_json::json!({
        "coreLayout": tree::is_core_node_workflow(&graph),
        "nodes": nodes,
        "edges": edges,
    }))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
