use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::{GraphLayout, NODE_RADIUS};
use crate::types::SiteTheme;

pub struct Palette {
	background: &'static str,
	edge: &'static str,
	edge_label: &'static str,
	node_label: &'static str,
	ring: &'static str,
	/// Slot 0 is for nodes without a kind.
	nodes: &'static [&'static str],
}

const LIGHT: Palette = Palette {
	background: "#ffffff",
	edge: "#94a3b8",
	edge_label: "#475569",
	node_label: "#0f172a",
	ring: "#0f172a",
	nodes: &[
		"#64748b", "#2563eb", "#ea580c", "#16a34a", "#dc2626", "#7c3aed", "#0891b2", "#db2777",
	],
};

const DARK: Palette = Palette {
	background: "#0b1220",
	edge: "#64748b",
	edge_label: "#94a3b8",
	node_label: "#e5e7eb",
	ring: "#f8fafc",
	nodes: &[
		"#94a3b8", "#60a5fa", "#fb923c", "#34d399", "#f87171", "#a78bfa", "#22d3ee", "#f472b6",
	],
};

pub fn palette(theme: SiteTheme) -> &'static Palette {
	if theme.is_dark() { &DARK } else { &LIGHT }
}

impl Palette {
	pub fn node_color(&self, slot: usize) -> &'static str {
		self.nodes[slot % self.nodes.len()]
	}
}

pub fn paint(layout: &GraphLayout, theme: SiteTheme, ctx: &CanvasRenderingContext2d) {
	let p = palette(theme);
	ctx.set_fill_style_str(p.background);
	ctx.fill_rect(0.0, 0.0, layout.width, layout.height);
	ctx.save();
	let _ = ctx.translate(layout.camera.x, layout.camera.y);
	let _ = ctx.scale(layout.camera.k, layout.camera.k);
	paint_edges(layout, p, ctx);
	paint_nodes(layout, p, ctx);
	ctx.restore();
}

fn paint_edges(layout: &GraphLayout, p: &Palette, ctx: &CanvasRenderingContext2d) {
	let k = layout.camera.k;
	let positions = layout.positions();
	let arrow = 7.0 / k.max(0.5);
	ctx.set_line_width(1.2 / k.max(0.5));
	ctx.set_font(&format!("{}px Inter, sans-serif", 9.0 / k.max(0.5)));
	ctx.set_text_align("center");

	for edge in &layout.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = dx.hypot(dy);
		if dist < NODE_RADIUS * 2.0 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);

		ctx.set_stroke_style_str(p.edge);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(tip_x - ux * arrow, tip_y - uy * arrow);
		ctx.stroke();

		let (bx, by) = (tip_x - ux * arrow, tip_y - uy * arrow);
		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
		ctx.set_fill_style_str(p.edge);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(bx + px, by + py);
		ctx.line_to(bx - px, by - py);
		ctx.close_path();
		ctx.fill();

		if let Some(label) = &edge.label {
			ctx.set_fill_style_str(p.edge_label);
			let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0 - 3.0);
		}
	}
	ctx.set_text_align("start");
}

fn paint_nodes(layout: &GraphLayout, p: &Palette, ctx: &CanvasRenderingContext2d) {
	let k = layout.camera.k.max(0.5);
	ctx.set_font(&format!("{}px Inter, sans-serif", 11.0 / k));

	layout.sim.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let hovered = layout.hovered == Some(node.index());
		let radius = if hovered { NODE_RADIUS * 1.3 } else { NODE_RADIUS };

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(p.node_color(info.kind_slot));
		ctx.fill();

		if hovered {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(p.ring);
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str(p.node_label);
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 4.0);
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palettes_follow_site_theme() {
		assert_eq!(palette(SiteTheme::Dark).background, "#0b1220");
		assert_eq!(palette(SiteTheme::Light).background, "#ffffff");
	}

	#[test]
	fn node_colors_wrap_around() {
		let p = palette(SiteTheme::Light);
		assert_eq!(p.node_color(0), p.node_color(p.nodes.len()));
		assert_ne!(p.node_color(1), p.node_color(2));
	}
}
