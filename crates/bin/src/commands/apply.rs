//! Apply command - sets the order of the collection in a state file.

use reorder::backend::Mutation;
use reorder::{InMemory, KeyAllocator};

use crate::cli::{ApplyArgs, sequence};
use crate::output::{OutputFormat, print_table};
use crate::state;

/// Run the apply command
pub fn run(args: &ApplyArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut collection = state::load(&args.state)?;

    // Stage everything in memory; the state file is the only store
    let mut ctx = InMemory::new();
    collection.attach(&ctx)?;
    ctx.preload(collection.links());

    let mut alloc = match args.seed {
        Some(seed) => KeyAllocator::seeded(seed),
        None => KeyAllocator::new(),
    };

    let report = collection.set_order(&mut ctx, &mut alloc, sequence(&args.order))?;
    let mutations = ctx.take_mutations();

    if args.dry_run {
        tracing::info!(path = %args.state.display(), "Dry run, state file left untouched");
    } else {
        state::save(&args.state, &collection)?;
    }

    match format {
        OutputFormat::Human => {
            if mutations.is_empty() {
                println!("Order unchanged.");
            } else {
                let rows: Vec<_> = mutations.iter().map(mutation_row).collect();
                print_table(&["MUTATION", "ITEM", "KEY"], &rows);
                println!();
            }

            let rows: Vec<_> = collection
                .links()
                .iter()
                .enumerate()
                .map(|(position, link)| {
                    vec![
                        position.to_string(),
                        link.item().clone(),
                        link.key().to_string(),
                    ]
                })
                .collect();
            print_table(&["POS", "ITEM", "KEY"], &rows);

            println!();
            println!(
                "created {}, destroyed {}, rekeyed {}{}",
                report.created,
                report.destroyed,
                report.rekeyed,
                if report.rebalanced { " (rebalanced)" } else { "" }
            );
        }
        OutputFormat::Json => {
            let links: Vec<_> = collection
                .links()
                .iter()
                .map(|link| {
                    serde_json::json!({
                        "id": link.id(),
                        "item": link.item(),
                        "key": link.key(),
                    })
                })
                .collect();
            let value = serde_json::json!({
                "report": report,
                "mutations": mutations,
                "links": links,
                "saved": !args.dry_run,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}

fn mutation_row(mutation: &Mutation<String>) -> Vec<String> {
    let (kind, item, key) = match mutation {
        Mutation::ItemAttached { item } => ("attach item", item, None),
        Mutation::LinkInserted { item, key, .. } => ("insert link", item, Some(key)),
        Mutation::LinkUpdated { item, key, .. } => ("rekey link", item, Some(key)),
        Mutation::LinkDeleted { item, .. } => ("delete link", item, None),
        Mutation::ItemDeleted { item } => ("delete item", item, None),
    };
    vec![
        kind.to_string(),
        item.clone(),
        key.map(ToString::to_string).unwrap_or_default(),
    ]
}
