use crate::cli::{BackendArg, DrawArgs};
use crate::dispatch::load_transit_graph;
use crate::output::{fmt_section, OutputConfig};
use anyhow::{Context, Result};
use octilinearizer::prelude::{octilinearize, Backend, Config};

pub fn draw(args: &DrawArgs, out: &OutputConfig) -> Result<()> {
    let tg = load_transit_graph(&args.input)?;

    let mut cfg = Config::new(args.grid_size);
    cfg.border_rad = args.border_rad;
    cfg.seed = args.seed;
    cfg.retries = args.retries;
    cfg.iters = args.iters;
    cfg.backend = match args.backend {
        BackendArg::Heuristic => Backend::Heuristic,
        BackendArg::Ilp => Backend::Ilp,
    };
    cfg.validate().context("Invalid configuration")?;

    if !out.quiet {
        eprintln!(
            "Drawing {} nodes, {} edges onto a {:.1}-unit grid (seed {})...",
            tg.num_nodes(),
            tg.num_edges(),
            cfg.grid_size,
            cfg.seed
        );
    }

    let result = octilinearize(&tg, &cfg).context("Octilinearization failed")?;

    let json_val: serde_json::Value = serde_json::from_str(
        &result
            .transit_graph
            .to_json_string()
            .context("Failed to serialize drawing")?,
    )
    .context("Failed to re-parse serialized drawing")?;

    let text = format!(
        "{}\nNodes: {}\nEdges: {}",
        fmt_section("Drawing complete"),
        result.transit_graph.num_nodes(),
        result.transit_graph.num_edges(),
    );

    out.emit(&text, &json_val)
}
