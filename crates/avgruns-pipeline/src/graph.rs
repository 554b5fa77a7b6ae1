//! Pipeline graph artifact.
//!
//! Writes a Graphviz DOT description of the fixed five-stage graph once
//! per run. Operator-facing only; nothing downstream consumes it.

use std::fs;
use std::path::Path;

use avgruns_core::{AvgRunsError, Result};

const GRAPH: &str = "\
digraph avgruns {
    rankdir=LR;
    node [shape=box, style=rounded];

    select [label=\"select scans\"];
    split [label=\"reference / floating split\"];
    register [label=\"flirt (dof=6, sinc)\"];
    assemble [label=\"fslmerge -t\"];
    average [label=\"fslmaths -Tmean\"];
    publish [label=\"publish\"];

    select -> split;
    split -> register [label=\"floating[i]\"];
    split -> assemble [label=\"reference\"];
    register -> assemble [label=\"aligned[i]\"];
    assemble -> average;
    average -> publish;
}
";

/// Write the pipeline graph to `path`, creating parent directories.
pub fn write_graph(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AvgRunsError::io(parent, e))?;
    }
    fs::write(path, GRAPH).map_err(|e| AvgRunsError::io(path, e))
}
