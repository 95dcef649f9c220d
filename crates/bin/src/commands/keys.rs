//! Keys command - shows the layout of a full rebalance.

use reorder::KeyAllocator;

use crate::cli::KeysArgs;
use crate::output::{OutputFormat, print_table};

/// Run the keys command
pub fn run(args: &KeysArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    // Rebalancing draws no random numbers, any seed gives the same layout
    let keys = KeyAllocator::seeded(0).rebalance_all(usize::try_from(args.count)?);

    match format {
        OutputFormat::Human => {
            if keys.is_empty() {
                println!("No keys.");
                return Ok(());
            }
            let rows: Vec<_> = keys
                .iter()
                .enumerate()
                .map(|(position, key)| vec![position.to_string(), key.to_string()])
                .collect();
            print_table(&["POS", "KEY"], &rows);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&keys)?);
        }
    }

    Ok(())
}
