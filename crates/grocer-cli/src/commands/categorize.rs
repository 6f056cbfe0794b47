//! Categorize command - show which spending category item names fall into.

use clap::Args;
use serde::Serialize;

use super::load_config;

/// Arguments for the categorize command.
#[derive(Args)]
pub struct CategorizeArgs {
    /// Item names as printed on a receipt
    #[arg(required = true)]
    names: Vec<String>,

    /// Print a JSON array instead of tab-separated lines
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Assignment<'a> {
    name: &'a str,
    category: &'a str,
}

pub async fn run(args: CategorizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let taxonomy = &config.taxonomy;

    let assignments: Vec<Assignment> = args
        .names
        .iter()
        .map(|name| Assignment {
            name,
            category: taxonomy.categorize(name),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assignments)?);
    } else {
        for assignment in &assignments {
            println!("{}\t{}", assignment.name, assignment.category);
        }
    }

    Ok(())
}
