use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Confirm };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use mathsnap::{ ClassifiedError, GraphData, HistoryEntry, ParsedSolution };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn terminal_width() -> usize {
    (Term::stdout().size().1 as usize).max(40)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with wrapping, indented by `indent` spaces
pub fn print_wrapped(text: &str, indent: usize) {
    let pad = " ".repeat(indent);
    for wrapped_line in wrap(text, terminal_width().saturating_sub(indent + 4)) {
        println!("{}{}", pad, wrapped_line);
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a classified failure with its follow-up hint
pub fn print_classified_error(err: &ClassifiedError) {
    eprintln!("{} {} {}", "ERROR:".red().bold(), format!("[{}]", err.code).red(), err.message);
    if let Some(hint) = err.code.user_hint() {
        eprintln!("       {}", hint.dimmed());
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Render a worked solution
pub fn display_solution(solution: &ParsedSolution) {
    print_result("Original Equation", &solution.original_equation);
    println!();

    if solution.is_degraded() {
        print_warning("No worked steps were returned.");
    }
    for (i, step) in solution.steps.iter().enumerate() {
        println!("{}", format!("Step {}", i + 1).cyan().bold());
        print_wrapped(step, 2);
    }

    println!();
    println!("{}", "Final Answer".green().bold());
    print_wrapped(&solution.final_answer, 2);
}

/// Render sampled graph points as a table
pub fn display_graph(graph: &GraphData) {
    print_result("Expression", &graph.expression);
    println!();
    println!("{:>8}  {:>14}", "x".bold(), "y".bold());
    for point in &graph.points {
        let y = match point.y {
            Some(y) => format!("{:.4}", y),
            None => "undefined".dimmed().to_string(),
        };
        println!("{:>8}  {:>14}", point.x, y);
    }
}

/// One line per entry, newest first, numbered from 1
pub fn display_history_list(entries: &[HistoryEntry]) {
    for (i, entry) in entries.iter().rev().enumerate() {
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            entry.solution.original_equation.bold(),
            format!("→ {}", entry.solution.final_answer)
        );
    }
}

/// Ask the user to confirm an action
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
