use std::path::Path;

use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use crossterm::style::Stylize;
use dotscribe::{
    knowledge::SEPARATOR,
    orchestrator::{Reporter, RunOutcome, RunSummary, Stage},
    Error,
};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Colored status lines on stdout, one block per input.
#[derive(Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn start(&mut self, input: &Path) {
        println!("{SEPARATOR}");
        println!("Starting extraction of: {}", file_name(input));
        println!("{SEPARATOR}");
    }

    fn stage(&mut self, stage: Stage) {
        println!(
            "{}",
            format!("[{}/{}] {stage}", stage.step(), Stage::COUNT).cyan()
        );
    }

    fn success(&mut self, summary: &RunSummary) {
        println!(
            "{}",
            format!(
                "Success: '{}' and '{}' generated!",
                file_name(&summary.index_path),
                file_name(&summary.knowledge_base_path)
            )
            .green()
        );
        println!(
            "{}",
            format!(
                "Index summary: {} namespaces, {} types, {} members.",
                summary.index_namespaces, summary.index_types, summary.index_members
            )
            .dark_grey()
        );
        println!(
            "{}",
            format!(
                "Summary: {} namespaces included, {} types analyzed, {} types emitted.",
                summary.kb_namespaces, summary.kb_types_considered, summary.kb_types_emitted
            )
            .dark_grey()
        );
        if summary.kb_failures > 0 {
            println!(
                "{}",
                format!("{} types failed to decompile.", summary.kb_failures).yellow()
            );
        }
        if summary.truncated {
            println!(
                "{}",
                "WARNING: Token limit reached. Output file may be incomplete.".yellow()
            );
        }
        println!("{}", "Process finished successfully!".green());
    }

    fn failure(&mut self, input: &Path, error: &Error) {
        let message = match error {
            Error::InvalidInput { reason, .. } => format!(
                "ERROR: Invalid or missing file ({reason}). Skipping: '{}'",
                input.display()
            ),
            _ => format!("CRITICAL ERROR processing '{}': {error}", file_name(input)),
        };
        eprintln!("{}", message.red());
    }

    fn finished(&mut self, outcome: &RunOutcome) {
        println!("{SEPARATOR}");
        if !outcome.summaries.is_empty() {
            print_summary_table(&outcome.summaries);
        }
        if outcome.is_success() {
            println!("{}", "Knowledge extraction for all files completed!".cyan());
        } else {
            println!(
                "{}",
                format!(
                    "Knowledge extraction completed with {} failed input(s).",
                    outcome.failures.len()
                )
                .yellow()
            );
        }
    }
}

/// Whitespace-aligned table of per-input counts.
fn print_summary_table(summaries: &[RunSummary]) {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["INPUT", "TYPES", "MEMBERS", "EMITTED", "FAILED", "TRUNCATED"]);

    for summary in summaries {
        table.add_row(vec![
            file_name(&summary.input),
            summary.index_types.to_string(),
            summary.index_members.to_string(),
            summary.kb_types_emitted.to_string(),
            summary.kb_failures.to_string(),
            if summary.truncated { "yes" } else { "no" }.to_string(),
        ]);
    }

    let last = 5;
    for i in 0..=last {
        if let Some(column) = table.column_mut(i) {
            if i > 0 {
                column.set_cell_alignment(CellAlignment::Right);
            }
            column.set_padding((u16::from(i != 0), u16::from(i != last)));
        }
    }

    for line in table.to_string().lines() {
        println!("  {}", line.trim_end());
    }
}
