use anyhow::Result;
use std::path::Path;

use mathsnap::{ sample_graph, CompletionClient, ConnectivityCheck, GraphRange, MathSolver };

use crate::cli::commands::load_image;
use crate::cli::ui;
use crate::cli::OutputFormat;

/// Graph command: sample the equation over an integer x range
pub async fn execute<C: CompletionClient, K: ConnectivityCheck>(
    solver: &MathSolver<C, K>,
    image_path: Option<&Path>,
    equation: Option<&str>,
    range: GraphRange,
    format: OutputFormat
) -> Result<()> {
    let equation = match (image_path, equation) {
        (Some(path), _) => {
            let image = load_image(path)?;
            let spinner = ui::spinner_with_message("Analyzing the image to extract the equation...");
            let result = solver.extract_equation(&image).await;
            spinner.finish_and_clear();
            result?
        }
        (None, Some(text)) => mathsnap::normalize_equation(text),
        (None, None) => anyhow::bail!("Provide either --image or --equation"),
    };

    let graph = sample_graph(&equation, range)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
        OutputFormat::Text => {
            ui::print_header("Graph");
            ui::print_result("Equation", &equation);
            ui::display_graph(&graph);
            let undefined = graph.points.len() - graph.defined_points().count();
            if undefined > 0 {
                ui::print_info(&format!("{} point(s) are undefined", undefined));
            }
        }
    }
    Ok(())
}
