use crate::dispatch::load_transit_graph;
use crate::output::{fmt_dim, fmt_section, OutputConfig};
use anyhow::Result;
use std::path::Path;

pub fn inspect(input: &Path, out: &OutputConfig) -> Result<()> {
    let tg = load_transit_graph(input)?;

    let num_stops = tg
        .node_indices()
        .filter(|&n| tg.node(n).has_stops())
        .count();
    let bbox = tg.bbox();

    let mut text = format!("{}\n", fmt_section("Transit graph"));
    text.push_str(&format!("Nodes: {} ({} with stops)\n", tg.num_nodes(), num_stops));
    text.push_str(&format!("Edges: {}\n", tg.num_edges()));
    match bbox {
        Some(b) => text.push_str(&format!(
            "Bounding box: ({:.2}, {:.2}) - ({:.2}, {:.2}) [{}]\n",
            b.min.x,
            b.min.y,
            b.max.x,
            b.max.y,
            fmt_dim(&format!("{:.2} x {:.2}", b.width(), b.height()))
        )),
        None => text.push_str("Bounding box: (empty graph)\n"),
    }

    let json_val = serde_json::json!({
        "num_nodes": tg.num_nodes(),
        "num_nodes_with_stops": num_stops,
        "num_edges": tg.num_edges(),
        "bbox": bbox.map(|b| serde_json::json!({
            "min": {"x": b.min.x, "y": b.min.y},
            "max": {"x": b.max.x, "y": b.max.y},
        })),
    });

    out.emit(&text, &json_val)
}
