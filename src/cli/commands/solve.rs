use anyhow::Result;
use log::{ info, warn };
use std::path::Path;

use mathsnap::{
    CompletionClient,
    ConnectivityCheck,
    EquationSource,
    HistoryEntry,
    HistoryStore,
    MathSolver,
};

use crate::cli::commands::load_image;
use crate::cli::ui;
use crate::cli::OutputFormat;

/// Solve command: image or typed equation in, worked solution out
pub async fn execute<C: CompletionClient, K: ConnectivityCheck, H: HistoryStore>(
    solver: &MathSolver<C, K>,
    history: &H,
    image_path: Option<&Path>,
    equation: Option<&str>,
    save_history: bool,
    format: OutputFormat
) -> Result<()> {
    let (result, source) = match (image_path, equation) {
        (Some(path), _) => {
            let image = load_image(path)?;
            let spinner = ui::spinner_with_message("Analyzing the image and solving the equation...");
            let result = solver.solve_image(&image).await;
            spinner.finish_and_clear();
            (result, EquationSource::Image)
        }
        (None, Some(text)) => {
            let spinner = ui::spinner_with_message("Generating step-by-step solution...");
            let result = solver.solve_text(text).await;
            spinner.finish_and_clear();
            (result, EquationSource::Text)
        }
        (None, None) => anyhow::bail!("Provide either --image or --equation"),
    };

    let solution = result?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&solution)?),
        OutputFormat::Text => {
            ui::print_header("Solution");
            ui::display_solution(&solution);
        }
    }

    if save_history {
        // A failed history write is reported but does not fail the solve
        match history.append(HistoryEntry::new(source, solution)) {
            Ok(()) => info!("Solution saved to history"),
            Err(e) => {
                warn!("Could not save solution to history: {}", e);
                ui::print_warning(&format!("Could not save solution to history: {}", e));
            }
        }
    }

    Ok(())
}
