// src/render/mod.rs

//! Renderer-facing export of a lattice and its stabilizer table.
//!
//! A [`LatticeGraph`] is a plain node list plus edge list. It serializes to
//! JSON for web front ends and to Graphviz DOT source for the `fdp` engine,
//! which honors the pinned `pos` of every node.

use crate::core::{StabilizerKind, SurfaceCodeError};
use crate::lattice::Lattice;
use crate::stabilizers::{StabilizerTable, slot_is_leading};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Whether a node is a data or a measurement qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    Data,
    Measurement,
}

/// One qubit of the drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// `D<i>` or `M<i>`
    pub name: String,
    /// Data or measurement qubit.
    pub class: NodeClass,
    /// Index within the qubit's class.
    pub index: usize,
    /// Only set for measurement qubits.
    pub kind: Option<StabilizerKind>,
    /// horizontal axis, +x is right
    pub x: f64,
    /// vertical axis, +y is down
    pub y: f64,
}

/// A directed coupling between a measurement qubit and one of its data neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Name of the source node.
    pub tail: String,
    /// Name of the target node.
    pub head: String,
    /// Kind of the measurement qubit the edge belongs to.
    pub kind: StabilizerKind,
}

/// Nodes and edges of a lattice, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeGraph {
    /// Data qubits first, then measurement qubits, each in index order.
    pub nodes: Vec<GraphNode>,
    /// One edge per non-empty neighbor slot.
    pub edges: Vec<GraphEdge>,
}

impl LatticeGraph {
    /// Collects every qubit as a node and every present neighbor as an edge.
    ///
    /// Neighbors above (rotated) or north/west (unrotated) of a measurement
    /// qubit point data-to-measurement; the rest point measurement-to-data.
    pub fn new(lattice: &Lattice, table: &StabilizerTable) -> Self {
        let params = lattice.params();
        let mut nodes = Vec::with_capacity(lattice.num_data_qubits() + lattice.num_measure_qubits());

        for (index, coordinate) in lattice.data_sites().iter().enumerate() {
            nodes.push(GraphNode {
                name: format!("D{}", index),
                class: NodeClass::Data,
                index,
                kind: None,
                x: coordinate.x(),
                y: coordinate.y(),
            });
        }
        for (index, site) in lattice.measure_sites().iter().enumerate() {
            nodes.push(GraphNode {
                name: format!("M{}", index),
                class: NodeClass::Measurement,
                index,
                kind: Some(site.kind),
                x: site.coordinate.x(),
                y: site.coordinate.y(),
            });
        }

        let mut edges = Vec::with_capacity(table.total_weight());
        for (index, entry) in table.entries().iter().enumerate() {
            let measure = format!("M{}", index);
            for (slot, data) in entry.present() {
                let data = format!("D{}", data);
                let (tail, head) = if slot_is_leading(&params, entry.kind, slot) {
                    (data, measure.clone())
                } else {
                    (measure.clone(), data)
                };
                edges.push(GraphEdge { tail, head, kind: entry.kind });
            }
        }

        Self { nodes, edges }
    }

    /// Pretty-printed JSON of nodes and edges.
    pub fn to_json(&self) -> Result<String, SurfaceCodeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Graphviz DOT source. Positions are pinned with y flipped so the
    /// top row of the lattice is drawn on top; Z edges are green and X edges
    /// orange.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "strict graph lattice {{");
        let _ = writeln!(out, "    layout=fdp;");
        for node in &self.nodes {
            let style = match node.class {
                NodeClass::Data => String::new(),
                NodeClass::Measurement => ", style=filled, fontcolor=white, color=black".to_string(),
            };
            let _ = writeln!(out, "    \"{}\" [pos=\"{:.6},{:.6}!\"{}];", node.name, node.x, -node.y, style);
        }
        for edge in &self.edges {
            let color = match edge.kind {
                StabilizerKind::Z => "green",
                StabilizerKind::X => "orange",
            };
            let _ = writeln!(out, "    \"{}\" -- \"{}\" [color={}, label=\"{}\"];", edge.tail, edge.head, color, edge.kind);
        }
        let _ = writeln!(out, "}}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(distance: usize) -> Result<LatticeGraph, SurfaceCodeError> {
        let lattice = Lattice::rotated(distance)?;
        let table = StabilizerTable::build(&lattice)?;
        Ok(LatticeGraph::new(&lattice, &table))
    }

    #[test]
    fn every_qubit_and_neighbor_is_drawn() -> Result<(), SurfaceCodeError> {
        let g = graph(3)?;
        assert_eq!(g.nodes.len(), 17);
        assert_eq!(g.edges.len(), 24);
        assert_eq!(g.nodes.iter().filter(|n| n.class == NodeClass::Measurement).count(), 8);
        Ok(())
    }

    #[test]
    fn upper_neighbors_point_into_measure_qubit() -> Result<(), SurfaceCodeError> {
        let g = graph(3)?;
        // M1 is Z with corners a=D0, b=D1 above and d=D3, c=D4 below.
        let m1: Vec<&GraphEdge> = g.edges.iter().filter(|e| e.tail == "M1" || e.head == "M1").collect();
        assert_eq!(m1.len(), 4);
        assert!(m1.iter().any(|e| e.tail == "D0" && e.head == "M1"));
        assert!(m1.iter().any(|e| e.tail == "D1" && e.head == "M1"));
        assert!(m1.iter().any(|e| e.tail == "M1" && e.head == "D3"));
        assert!(m1.iter().any(|e| e.tail == "M1" && e.head == "D4"));
        Ok(())
    }

    #[test]
    fn dot_pins_flipped_positions() -> Result<(), SurfaceCodeError> {
        let dot = graph(3)?.to_dot();
        assert!(dot.starts_with("strict graph lattice {"));
        assert!(dot.contains("layout=fdp;"));
        // M0 sits at (0.5, -0.5)
        assert!(dot.contains("\"M0\" [pos=\"0.500000,0.500000!\""));
        assert!(dot.contains("\"D0\" -- \"M1\" [color=green, label=\"Z\"];"));
        assert!(dot.contains("color=orange"));
        Ok(())
    }

    #[test]
    fn json_lists_nodes_and_edges() -> Result<(), SurfaceCodeError> {
        let value: serde_json::Value = serde_json::from_str(&graph(3)?.to_json()?)?;
        assert_eq!(value["nodes"].as_array().map(Vec::len), Some(17));
        assert_eq!(value["nodes"][0]["name"], "D0");
        assert_eq!(value["nodes"][0]["class"], "data");
        assert_eq!(value["edges"].as_array().map(Vec::len), Some(24));
        Ok(())
    }
}
