use anyhow::Context;
use octilinearizer::prelude::TransitGraph;
use std::path::Path;

/// Read `path`'s contents, or stdin if `path` is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

pub fn load_transit_graph(path: &Path) -> anyhow::Result<TransitGraph> {
    let content = read_input(path)?;
    TransitGraph::from_json_str(&content)
        .with_context(|| format!("Failed to parse transit graph from {}", path.display()))
}
