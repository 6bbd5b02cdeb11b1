use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::routing::{
    COLLINEAR_EPSILON, DEFAULT_CELL_SIZE, WINDOW_MARGIN, WIRE_CLEARANCE_CELLS,
};
use crate::theme::Theme;

/// Knobs of the wire routing engine. The defaults reproduce the observed
/// constants; exposing them here keeps them overridable from a config file
/// without changing default behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub cell_size: f32,
    pub window_margin: f32,
    pub wire_clearance_cells: i32,
    pub collinear_epsilon: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            window_margin: WINDOW_MARGIN,
            wire_clearance_cells: WIRE_CLEARANCE_CELLS,
            collinear_epsilon: COLLINEAR_EPSILON,
        }
    }
}

/// Drawing parameters for the schematic surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    pub padding: f32,
    pub wire_width: f32,
    pub pin_radius: f32,
    pub bend_marker_radius: f32,
    pub draw_bend_markers: bool,
    pub label_line_height: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            padding: 24.0,
            wire_width: 1.4,
            pin_radius: 3.0,
            bend_marker_radius: 1.6,
            draw_bend_markers: true,
            label_line_height: 1.5,
        }
    }
}

/// Raster output parameters (PNG only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub routing: RoutingConfig,
    pub render: RenderOptions,
    pub raster: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    routing: Option<RoutingOverrides>,
    render: Option<RenderOverrides>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    component_fill: Option<String>,
    component_border: Option<String>,
    wire_color: Option<String>,
    label_background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutingOverrides {
    cell_size: Option<f32>,
    window_margin: Option<f32>,
    wire_clearance_cells: Option<i32>,
    collinear_epsilon: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOverrides {
    padding: Option<f32>,
    wire_width: Option<f32>,
    pin_radius: Option<f32>,
    bend_marker_radius: Option<f32>,
    draw_bend_markers: Option<bool>,
    label_line_height: Option<f32>,
}

/// Load a config file and merge it over the defaults. Accepts strict JSON
/// first, then falls back to JSON5 for hand-written files with comments or
/// trailing commas.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "default" || theme_name == "light" {
            config.theme = Theme::schematic_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.raster.background = v;
        }
        if let Some(v) = vars.component_fill {
            config.theme.component_fill = v;
        }
        if let Some(v) = vars.component_border {
            config.theme.component_border = v;
        }
        if let Some(v) = vars.wire_color {
            config.theme.wire_color = v;
        }
        if let Some(v) = vars.label_background {
            config.theme.label_background = v;
        }
    }

    if let Some(routing) = parsed.routing {
        if let Some(v) = routing.cell_size {
            config.routing.cell_size = v;
        }
        if let Some(v) = routing.window_margin {
            config.routing.window_margin = v;
        }
        if let Some(v) = routing.wire_clearance_cells {
            config.routing.wire_clearance_cells = v;
        }
        if let Some(v) = routing.collinear_epsilon {
            config.routing.collinear_epsilon = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.wire_width {
            config.render.wire_width = v;
        }
        if let Some(v) = render.pin_radius {
            config.render.pin_radius = v;
        }
        if let Some(v) = render.bend_marker_radius {
            config.render.bend_marker_radius = v;
        }
        if let Some(v) = render.draw_bend_markers {
            config.render.draw_bend_markers = v;
        }
        if let Some(v) = render.label_line_height {
            config.render.label_line_height = v;
        }
    }

    Ok(config)
}
