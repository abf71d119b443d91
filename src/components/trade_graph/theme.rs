//! Visual theming for the trade graph.
//!
//! Node fill colors come from the highlight (marker colors plus the
//! transaction palette); everything else drawn on the canvas is styled here.

use crate::network::MarkerColors;
use crate::network::colors::Color;

/// Canvas backdrop behind the scene.
#[derive(Clone, Debug)]
pub struct SceneStyle {
	/// Outer fill, and the rim of the radial wash
	pub paper: Color,
	/// Center of the radial wash, also used behind tooltips
	pub plot: Color,
	pub radial_wash: bool,
	/// Darkening toward the corners, 0.0 disables it
	pub vignette: f64,
}

/// Trade links between layers.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Overview figure, nothing selected
	pub overview: Color,
	/// Chains drawn for a selection
	pub selection: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct Outline {
	pub width: f64,
	pub color: Color,
}

/// Entity markers and their labels.
#[derive(Clone, Debug)]
pub struct MarkerStyle {
	/// Shade markers as spheres instead of flat discs
	pub shaded: bool,
	pub outline: Option<Outline>,
	pub label: Color,
}

/// Layer guides: one line per layer plus its name, and the figure title.
#[derive(Clone, Debug)]
pub struct LayerGuideStyle {
	pub line: Color,
	pub text: Color,
	pub title: Color,
}

#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub scene: SceneStyle,
	pub links: LinkStyle,
	pub marker: MarkerStyle,
	pub guides: LayerGuideStyle,
	pub markers: MarkerColors,
}

impl Theme {
	/// Pale blue plot area with white guides, grey links and a red selection.
	pub fn default_theme() -> Self {
		let ink = Color::rgb(42, 63, 95);
		Self {
			name: "default",
			scene: SceneStyle {
				paper: Color::rgb(229, 236, 246),
				plot: Color::rgb(250, 250, 252),
				radial_wash: true,
				vignette: 0.0,
			},
			links: LinkStyle {
				overview: Color::rgba(128, 128, 128, 0.8),
				selection: Color::rgb(128, 128, 128),
			},
			marker: MarkerStyle {
				shaded: false,
				outline: None,
				label: ink,
			},
			guides: LayerGuideStyle {
				line: Color::rgba(255, 255, 255, 0.9),
				text: ink,
				title: ink,
			},
			markers: MarkerColors::default(),
		}
	}

	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			scene: SceneStyle {
				paper: Color::rgb(16, 19, 27),
				plot: Color::rgb(27, 31, 42),
				radial_wash: true,
				vignette: 0.2,
			},
			links: LinkStyle {
				overview: Color::rgba(96, 116, 146, 0.45),
				selection: Color::rgba(200, 210, 225, 0.9),
			},
			marker: MarkerStyle {
				shaded: true,
				outline: None,
				label: Color::rgba(255, 255, 255, 0.85),
			},
			guides: LayerGuideStyle {
				line: Color::rgba(96, 116, 146, 0.25),
				text: Color::rgba(180, 190, 210, 0.8),
				title: Color::rgba(255, 255, 255, 0.9),
			},
			markers: MarkerColors {
				neutral: Color::rgb(110, 118, 130),
				selected: Color::rgb(235, 64, 52),
			},
		}
	}

	/// White paper, outlined markers.
	pub fn minimal() -> Self {
		let white = Color::rgb(255, 255, 255);
		Self {
			name: "minimal",
			scene: SceneStyle {
				paper: white,
				plot: white,
				radial_wash: false,
				vignette: 0.0,
			},
			links: LinkStyle {
				overview: Color::rgba(126, 141, 162, 0.4),
				selection: Color::rgba(60, 70, 85, 0.9),
			},
			marker: MarkerStyle {
				shaded: false,
				outline: Some(Outline {
					width: 1.0,
					color: Color::rgba(0, 0, 0, 0.3),
				}),
				label: Color::rgb(40, 40, 40),
			},
			guides: LayerGuideStyle {
				line: Color::rgba(0, 0, 0, 0.1),
				text: Color::rgb(90, 90, 90),
				title: Color::rgb(20, 20, 20),
			},
			markers: MarkerColors::default(),
		}
	}

	/// Theme by name, falling back to the default for unknown names.
	pub fn by_name(name: &str) -> Self {
		match name {
			"midnight" => Self::midnight(),
			"minimal" => Self::minimal(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
