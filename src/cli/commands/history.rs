use anyhow::{ anyhow, Result };

use mathsnap::HistoryStore;

use crate::cli::ui;
use crate::cli::{ HistoryAction, OutputFormat };

/// History command: list, show or clear saved solutions
pub fn execute<H: HistoryStore>(history: &H, action: &HistoryAction, format: OutputFormat) -> Result<()> {
    match action {
        HistoryAction::List => {
            let entries = history.load()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Text if entries.is_empty() => ui::print_info("No saved solutions."),
                OutputFormat::Text => {
                    ui::print_header("History");
                    ui::display_history_list(&entries);
                }
            }
        }
        HistoryAction::Show { index } => {
            let entries = history.load()?;
            // Numbered newest first, as in `history list`
            let entry = index
                .checked_sub(1)
                .and_then(|i| entries.iter().rev().nth(i))
                .ok_or_else(|| anyhow!("No saved solution numbered {}", index))?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
                OutputFormat::Text => {
                    ui::print_header(&format!("Solution #{}", index));
                    ui::print_result(
                        "Saved",
                        &entry.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
                    );
                    ui::display_solution(&entry.solution);
                }
            }
        }
        HistoryAction::Clear { yes } => {
            if !*yes && !ui::confirm_action("Delete all saved solutions?")? {
                ui::print_info("History left unchanged.");
                return Ok(());
            }
            history.clear()?;
            ui::print_success("History cleared.");
        }
    }
    Ok(())
}
