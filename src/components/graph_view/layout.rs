use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::types::Graph;

pub const NODE_RADIUS: f64 = 7.0;
const HIT_RADIUS: f64 = 14.0;
const MIN_ZOOM: f64 = 0.2;
const MAX_ZOOM: f64 = 6.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	/// Palette slot; 0 for nodes without a kind.
	pub kind_slot: usize,
}

#[derive(Clone, Debug)]
pub struct EdgeLine {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: Option<String>,
}

#[derive(Clone, Copy, Debug)]
pub struct Camera {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Copy, Debug, Default)]
enum Gesture {
	#[default]
	Idle,
	DragNode {
		idx: DefaultNodeIdx,
		grab: (f64, f64),
		origin: (f32, f32),
	},
	Pan {
		grab: (f64, f64),
		origin: (f64, f64),
	},
}

/// Force simulation plus camera and pointer state for one graph.
pub struct GraphLayout {
	pub sim: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeLine>,
	pub camera: Camera,
	pub hovered: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	gesture: Gesture,
}

impl GraphLayout {
	pub fn new(graph: &Graph, width: f64, height: f64) -> Self {
		let mut sim = ForceGraph::new(SimulationParameters {
			force_charge: 250.0,
			force_spring: 0.06,
			force_max: 120.0,
			node_speed: 3000.0,
			damping_factor: 0.85,
		});

		let mut kinds: Vec<&str> = Vec::new();
		let mut by_id = HashMap::new();
		let count = graph.nodes.len().max(1) as f64;
		let ring = 40.0 + 8.0 * count;

		for (i, node) in graph.nodes.iter().enumerate() {
			let kind_slot = match node.kind.as_deref() {
				Some(kind) => match kinds.iter().position(|k| *k == kind) {
					Some(pos) => pos + 1,
					None => {
						kinds.push(kind);
						kinds.len()
					}
				},
				None => 0,
			};
			// Seed on a circle so the first frames are not a single point.
			let angle = i as f64 * 2.0 * PI / count;
			let idx = sim.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.display_label().to_string(),
					kind_slot,
				},
			});
			by_id.insert(node.id.as_str(), idx);
		}

		let mut edges = Vec::with_capacity(graph.edges.len());
		for edge in &graph.edges {
			let (Some(&source), Some(&target)) = (
				by_id.get(edge.source.as_str()),
				by_id.get(edge.target.as_str()),
			) else {
				continue;
			};
			if source != target {
				sim.add_edge(source, target, EdgeData::default());
			}
			edges.push(EdgeLine {
				source,
				target,
				label: edge.label.clone().filter(|l| !l.is_empty()),
			});
		}

		Self {
			sim,
			edges,
			camera: Camera {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			hovered: None,
			width,
			height,
			gesture: Gesture::Idle,
		}
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.sim.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	fn to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.camera.x) / self.camera.k,
			(sy - self.camera.y) / self.camera.k,
		)
	}

	pub fn node_at(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (wx, wy) = self.to_world(sx, sy);
		let mut best: Option<(DefaultNodeIdx, f64)> = None;
		self.sim.visit_nodes(|node| {
			let d = (node.x() as f64 - wx).hypot(node.y() as f64 - wy);
			if d < HIT_RADIUS && best.is_none_or(|(_, bd)| d < bd) {
				best = Some((node.index(), d));
			}
		});
		best.map(|(idx, _)| idx)
	}

	pub fn press(&mut self, sx: f64, sy: f64) {
		self.gesture = match self.node_at(sx, sy) {
			Some(idx) => {
				let mut origin = (0.0, 0.0);
				self.sim.visit_nodes(|node| {
					if node.index() == idx {
						origin = (node.x(), node.y());
					}
				});
				Gesture::DragNode {
					idx,
					grab: (sx, sy),
					origin,
				}
			}
			None => Gesture::Pan {
				grab: (sx, sy),
				origin: (self.camera.x, self.camera.y),
			},
		};
	}

	pub fn drag(&mut self, sx: f64, sy: f64) {
		match self.gesture {
			Gesture::Idle => self.hovered = self.node_at(sx, sy),
			Gesture::DragNode { idx, grab, origin } => {
				let k = self.camera.k;
				let (nx, ny) = (
					origin.0 + ((sx - grab.0) / k) as f32,
					origin.1 + ((sy - grab.1) / k) as f32,
				);
				self.sim.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
			Gesture::Pan { grab, origin } => {
				self.camera.x = origin.0 + (sx - grab.0);
				self.camera.y = origin.1 + (sy - grab.1);
			}
		}
	}

	/// Ends the current gesture; a dragged node stays pinned where dropped.
	pub fn release(&mut self) {
		self.gesture = Gesture::Idle;
	}

	pub fn leave(&mut self) {
		self.release();
		self.hovered = None;
	}

	/// Zooms by `factor` keeping the screen point under the cursor fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let k = (self.camera.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.camera.k;
		self.camera.x = sx - (sx - self.camera.x) * ratio;
		self.camera.y = sy - (sy - self.camera.y) * ratio;
		self.camera.k = k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.sim.update(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.camera.x += (width - self.width) / 2.0;
		self.camera.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
