//! Cache identity of an array.

use clap::Args;
use serde::Serialize;

use codex_datacache::{Array, DataCache, Kind, MemoryCache};

use super::{load_file, output_result};
use crate::Cli;

/// Print the content hash an array would be cached under.
///
/// The file holds a tagged array, e.g. `{"type": "labels", "values": [0, 1]}`.
#[derive(Args)]
pub struct HashCommand {
    /// Array file (JSON or YAML)
    file: String,

    /// Name to store the array under
    #[arg(long, default_value = "input")]
    name: String,

    /// Array kind: feature, label, subset or downsample
    #[arg(long, default_value_t = Kind::Feature)]
    kind: Kind,
}

#[derive(Debug, Serialize)]
struct HashOutput {
    hash: String,
    name: String,
    kind: Kind,
    samples: usize,
}

impl HashCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let data: Array = load_file(&self.file)?;
        let output = hash(&self.name, data, self.kind)?;
        output_result(&output, cli.output.as_deref(), cli.json)
    }
}

fn hash(name: &str, data: Array, kind: Kind) -> anyhow::Result<HashOutput> {
    let cache = MemoryCache::new();
    let entry = cache.hash_array(name, data, kind)?;
    Ok(HashOutput {
        hash: entry.hash,
        name: entry.name,
        kind: entry.kind,
        samples: entry.samples,
    })
}
