//! Canvas rendering for the trade graph.
//!
//! Everything is projected to screen space first, then drawn in passes:
//! 1. Background and layer guides
//! 2. Edge segments from the figure's edge trace
//! 3. Nodes, far to near, with labels
//! 4. Vignette, then title and the hover tooltip on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::camera::{Projected, Projector, Vec3};
use super::scale::ScaleConfig;
use super::scene::TradeGraphState;
use super::theme::Theme;
use crate::network::builder::{Layer, Position};
use crate::network::colors::Color;

/// Renders the complete figure to the canvas.
pub fn render(
	state: &TradeGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let projector = state.projector();
	let projected = state.projected_nodes(&projector);

	draw_background(state, ctx, theme);
	draw_layer_guides(ctx, &projector, theme);
	draw_edges(state, ctx, &projector, config, theme);
	draw_nodes(state, ctx, &projected, config, theme);

	if theme.scene.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}

	draw_title(state, ctx, theme);
	draw_tooltip(state, ctx, &projected, config, theme);
}

fn draw_background(state: &TradeGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.scene
		.radial_wash
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.scene.plot.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.scene.paper.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.scene.paper.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &TradeGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Ok(gradient) = ctx.create_radial_gradient(
		state.width / 2.0,
		state.height / 2.0,
		state.width.min(state.height) * 0.3,
		state.width / 2.0,
		state.height / 2.0,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.scene.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// One line across the scene per layer, labelled with the layer's name.
fn draw_layer_guides(ctx: &CanvasRenderingContext2d, projector: &Projector, theme: &Theme) {
	let bounds = *projector.bounds();
	ctx.set_line_width(1.0);
	ctx.set_font("12px sans-serif");

	for layer in Layer::ALL {
		let z = bounds
			.normalize(Position {
				x: bounds.min.x,
				y: 0.0,
				z: layer.z(),
			})
			.z;
		let start = projector.project_normalized(Vec3::new(-1.0, 0.0, z));
		let end = projector.project_normalized(Vec3::new(1.0, 0.0, z));
		let (Some(start), Some(end)) = (start, end) else {
			continue;
		};

		ctx.set_stroke_style_str(&theme.guides.line.to_css());
		ctx.begin_path();
		ctx.move_to(start.x, start.y);
		ctx.line_to(end.x, end.y);
		ctx.stroke();

		ctx.set_fill_style_str(&theme.guides.text.to_css());
		let _ = ctx.fill_text(layer.title(), start.x + 6.0, start.y - 6.0);
	}
}

fn draw_edges(
	state: &TradeGraphState,
	ctx: &CanvasRenderingContext2d,
	projector: &Projector,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let (color, width) = if state.figure.data.selected.is_some() {
		(theme.links.selection, config.link.selection_width)
	} else {
		(theme.links.overview, config.link.overview_width)
	};
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);

	ctx.begin_path();
	for (a, b) in state.figure.data.edges.segments() {
		if let (Some(a), Some(b)) = (projector.project(a), projector.project(b)) {
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
		}
	}
	ctx.stroke();
}

fn draw_nodes(
	state: &TradeGraphState,
	ctx: &CanvasRenderingContext2d,
	projected: &[Option<Projected>],
	config: &ScaleConfig,
	theme: &Theme,
) {
	let trace = &state.figure.data.nodes;
	let mut order: Vec<(usize, Projected)> = projected
		.iter()
		.enumerate()
		.filter_map(|(i, p)| p.map(|p| (i, p)))
		.collect();
	order.sort_by(|(_, a), (_, b)| b.depth.total_cmp(&a.depth));

	ctx.set_font(&config.label_font());
	for (i, p) in order {
		let color = trace.colors.get(i).copied().unwrap_or(theme.markers.neutral);
		let radius = config.node_radius(p.k);
		draw_node(ctx, &p, radius, color, theme);

		if state.figure.data.selected == Some(i) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius + 3.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.markers.selected.to_css());
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		let alpha = config.marker.label_fade.alpha(p.k);
		if alpha <= 0.05 {
			continue;
		}
		if let Some(label) = trace.labels.get(i) {
			let label_color = theme.marker.label;
			ctx.set_fill_style_str(&label_color.with_alpha(alpha * label_color.a).to_css());
			let _ = ctx.fill_text(label, p.x - radius, p.y - radius - 4.0);
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	p: &Projected,
	radius: f64,
	color: Color,
	theme: &Theme,
) {
	let gradient = theme
		.marker
		.shaded
		.then(|| {
			ctx.create_radial_gradient(p.x - radius * 0.3, p.y - radius * 0.3, 0.0, p.x, p.y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &color.to_css());
			let _ = gradient.add_color_stop(1.0, &color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&color.to_css()),
	}
	ctx.fill();

	if let Some(outline) = theme.marker.outline {
		ctx.set_stroke_style_str(&outline.color.to_css());
		ctx.set_line_width(outline.width);
		ctx.stroke();
	}
}

fn draw_title(state: &TradeGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.guides.title.to_css());
	ctx.set_font("18px sans-serif");
	let _ = ctx.fill_text(&state.figure.layout.title, 24.0, 36.0);
}

/// Label of the hovered node next to the pointer target.
fn draw_tooltip(
	state: &TradeGraphState,
	ctx: &CanvasRenderingContext2d,
	projected: &[Option<Projected>],
	config: &ScaleConfig,
	theme: &Theme,
) {
	let Some(i) = state.hovered else {
		return;
	};
	let (Some(Some(p)), Some(label)) = (projected.get(i), state.figure.data.nodes.labels.get(i))
	else {
		return;
	};

	let radius = config.node_radius(p.k);
	ctx.set_font(&config.label_font());
	let width = ctx.measure_text(label).map(|m| m.width()).unwrap_or(60.0);
	let (x, y) = (p.x + radius + 6.0, p.y - 10.0);

	ctx.set_fill_style_str(&theme.scene.plot.with_alpha(0.9).to_css());
	ctx.fill_rect(x - 4.0, y - config.marker.label_size, width + 8.0, config.marker.label_size + 8.0);
	ctx.set_fill_style_str(&theme.guides.text.to_css());
	let _ = ctx.fill_text(label, x, y);
}
