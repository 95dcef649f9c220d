//! Diff command - prints the edit script between two sequences.

use reorder::diff::{Change, diff};

use crate::cli::{DiffArgs, sequence};
use crate::output::{OutputFormat, print_table};

/// Run the diff command
pub fn run(args: &DiffArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let old = sequence(&args.old);
    let new = sequence(&args.new);
    let script = diff(&old, &new);

    match format {
        OutputFormat::Human => {
            if script.is_empty() {
                println!("Sequences are identical.");
                return Ok(());
            }

            let rows: Vec<_> = script
                .iter()
                .map(|change| {
                    let op = match change {
                        Change::Remove { .. } => "remove",
                        Change::Insert { .. } => "insert",
                    };
                    vec![
                        op.to_string(),
                        change.offset().to_string(),
                        change.item().clone(),
                    ]
                })
                .collect();
            print_table(&["OP", "OFFSET", "ITEM"], &rows);

            let moved = script.moved_items();
            if !moved.is_empty() {
                let names: Vec<&str> = moved.iter().map(|item| item.as_str()).collect();
                println!();
                println!("moved: {}", names.join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&script)?);
        }
    }

    Ok(())
}
