//! `batch`: every row of an uploaded table.

use std::path::Path;

use bidmiles_core::{
    DistanceResult, MileageAggregator, MileageRecord, PipelineOptions, RecordInput,
    RegionProvider, RoutingProvider,
};

use crate::table::Table;

/// A table that has been read and checked for its coordinate columns.
pub(crate) struct BatchInput {
    table: Table,
    inputs: Vec<RecordInput>,
}

/// Reads and validates `input` without touching the network.
///
/// # Errors
///
/// Returns an error if the input cannot be read or lacks a coordinate column.
pub(crate) fn load_input(input: &Path) -> anyhow::Result<BatchInput> {
    let table = Table::read_path(input)?;
    let inputs = table.record_inputs()?;
    tracing::info!(rows = inputs.len(), input = %input.display(), "input loaded");
    Ok(BatchInput { table, inputs })
}

/// Resolves every row, prints the results and writes the augmented CSV to
/// `output`.
///
/// # Errors
///
/// Returns an error if the output cannot be written. Individual bad rows are
/// not errors.
pub(crate) async fn run_batch<P>(
    aggregator: &MileageAggregator<P>,
    input: BatchInput,
    output: &Path,
) -> anyhow::Result<()>
where
    P: RoutingProvider + RegionProvider,
{
    let BatchInput { table, inputs } = input;

    let records = aggregator.process_batch(inputs).await;

    for line in render(&records, aggregator.options()) {
        println!("{line}");
    }

    for (idx, record) in records.iter().enumerate() {
        for issue in &record.issues {
            eprintln!("warning: {}: {issue}", row_name(idx, record));
        }
    }

    table
        .with_results(&records, aggregator.options())
        .write_path(output)?;

    let resolved = records.iter().filter(|r| r.is_resolved()).count();
    println!(
        "wrote {} rows ({resolved} fully resolved) to {}",
        records.len(),
        output.display()
    );
    Ok(())
}

/// `row N` is 1-based over data rows; the label is appended when present.
fn row_name(idx: usize, record: &MileageRecord) -> String {
    match &record.label {
        Some(label) => format!("row {} ({label})", idx + 1),
        None => format!("row {}", idx + 1),
    }
}

fn render(records: &[MileageRecord], options: &PipelineOptions) -> Vec<String> {
    let mut header = format!("{:<6}{:<24}{:>12}", "ROW", "LINE", "FURTHEST MI");
    if options.region_lookup {
        header.push_str(&format!("  {:<16}{:<16}", "LAUNCHER STATE", "RECEIVER STATE"));
    }
    if options.tracker_count.is_some() {
        header.push_str(&format!("{:>12}", "TOTAL MI"));
    }

    let mut lines = vec![header];
    for (idx, record) in records.iter().enumerate() {
        let label = record.label.as_deref().unwrap_or("\u{2014}");
        let mut line = format!(
            "{:<6}{:<24}{:>12}",
            idx + 1,
            truncate(label, 22),
            cell(record.furthest)
        );
        if options.region_lookup {
            line.push_str(&format!(
                "  {:<16}{:<16}",
                record.launcher_region.as_deref().unwrap_or(""),
                record.receiver_region.as_deref().unwrap_or("")
            ));
        }
        if options.tracker_count.is_some() {
            let total = record.total_mileage.unwrap_or(DistanceResult::Unresolved);
            line.push_str(&format!("{:>12}", cell(total)));
        }
        lines.push(line.trim_end().to_owned());
    }
    lines
}

fn cell(distance: DistanceResult) -> String {
    distance.miles().map_or_else(|| "\u{2014}".to_string(), |m| format!("{m:.2}"))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max - 3).collect::<String>())
    } else {
        text.to_owned()
    }
}
