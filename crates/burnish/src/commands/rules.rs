//! Rules command - List the built-in rules

use burnish_patina::rules::all_metas;
use burnish_patina::{RuleMeta, RuleRegistry};
use clap::Args;
use serde::Serialize;

use super::EXIT_OK;

#[derive(Args)]
pub struct RulesArgs {
    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleEntry {
    id: &'static str,
    group: &'static str,
    default_severity: &'static str,
    description: &'static str,
}

impl From<&RuleMeta> for RuleEntry {
    fn from(meta: &RuleMeta) -> Self {
        Self {
            id: meta.name,
            group: meta.category.as_str(),
            default_severity: meta.default_severity.as_str(),
            description: meta.description,
        }
    }
}

pub fn run(args: RulesArgs) -> i32 {
    let registry = RuleRegistry::with_recommended();
    let entries: Vec<RuleEntry> = all_metas(&registry)
        .into_iter()
        .map(RuleEntry::from)
        .collect();

    if args.format == "json" {
        match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{}", json),
            Err(error) => tracing::error!(%error, "failed to serialize rules"),
        }
    } else {
        print!("{}", render_table(&entries));
    }

    EXIT_OK
}

fn render_table(entries: &[RuleEntry]) -> String {
    let width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{:<width$}  {:<8}  {:<7}  {}\n",
            entry.id,
            entry.group,
            entry.default_severity,
            entry.description,
            width = width
        ));
    }
    out
}
