//! Offline label correspondence.

use std::collections::BTreeMap;

use clap::Args;
use serde::Serialize;

use codex_labels::LabelResolver;

use super::{get_config, load_file, output_result};
use crate::Cli;

/// Align the cluster ids of a new labeling with a reference labeling.
///
/// Both files hold a plain list of integer labels (JSON or YAML).
#[derive(Args)]
pub struct RelabelCommand {
    /// New labeling to relabel
    #[arg(long)]
    new: String,

    /// Reference labeling to align with
    #[arg(long)]
    reference: String,

    /// Fixed seed for anchor sampling (overrides config file)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct RelabelOutput {
    labels: Vec<i32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    mapping: BTreeMap<i32, i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<String>,
}

impl RelabelCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut cfg = get_config(cli)?.labels;
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }

        let new_labels: Vec<i32> = load_file(&self.new)?;
        let reference: Vec<i32> = load_file(&self.reference)?;
        tracing::debug!(
            new = new_labels.len(),
            reference = reference.len(),
            "relabel: loaded labelings"
        );

        let output = relabel(&LabelResolver::new(cfg), &new_labels, &reference);
        output_result(&output, cli.output.as_deref(), cli.json)
    }
}

fn relabel(resolver: &LabelResolver, new_labels: &[i32], reference: &[i32]) -> RelabelOutput {
    match resolver.correspond(new_labels, reference) {
        Ok(map) => RelabelOutput {
            labels: codex_labels::apply(&map, new_labels),
            mapping: map,
            skipped: None,
        },
        Err(skip) => RelabelOutput {
            labels: new_labels.to_vec(),
            mapping: BTreeMap::new(),
            skipped: Some(skip.to_string()),
        },
    }
}
