//! Three-layer trade graph visualization component.
//!
//! Renders the trade network on an HTML canvas with:
//! - Perspective projection of the (index, jitter, layer) scene
//! - Orbit and zoom camera controls that survive highlighting
//! - Click-to-highlight of a node's transactions
//! - Configurable theming and depth-dependent scaling
//!
//! # Example
//!
//! ```ignore
//! use trade_network::components::trade_graph::TradeGraphCanvas;
//!
//! let network = TradeNetwork::build(&rows, &Palette::plotly(), MarkerColors::default(), &mut BrowserJitter);
//! view! { <TradeGraphCanvas network=Signal::derive(move || network.clone()) fullscreen=true /> }
//! ```

pub mod camera;
mod component;
mod render;
pub mod scale;
pub mod scene;
pub mod theme;

pub use camera::Camera;
pub use component::TradeGraphCanvas;
pub use theme::Theme;
