use anyhow::Result;
use std::path::Path;

use mathsnap::{ CompletionClient, ConnectivityCheck, MathSolver };

use crate::cli::commands::load_image;
use crate::cli::ui;
use crate::cli::OutputFormat;

/// Extract command: print the normalized equation found in an image
pub async fn execute<C: CompletionClient, K: ConnectivityCheck>(
    solver: &MathSolver<C, K>,
    image_path: &Path,
    format: OutputFormat
) -> Result<()> {
    let image = load_image(image_path)?;

    let spinner = ui::spinner_with_message("Analyzing the image to extract the equation...");
    let result = solver.extract_equation(&image).await;
    spinner.finish_and_clear();
    let equation = result?;

    match format {
        OutputFormat::Json =>
            println!("{}", serde_json::json!({ "originalEquation": equation })),
        OutputFormat::Text => ui::print_result("Equation", &equation),
    }
    Ok(())
}
