#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod render;
pub mod routing;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderOptions, RoutingConfig, load_config};
pub use geometry::{Point, Rect};
pub use model::Circuit;
pub use parser::{NetlistError, parse_netlist};
pub use render::{Surface, SvgSurface, render_circuit, render_svg};
pub use routing::{compute_route, route_circuit, route_wire};
pub use theme::Theme;
