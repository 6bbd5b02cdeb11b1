use serde::{Deserialize, Serialize};

use crate::model::PinKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub component_fill: String,
    pub component_border: String,
    pub component_text_color: String,
    pub wire_color: String,
    pub bend_marker_color: String,
    pub label_background: String,
    pub label_text_color: String,
    pub pin_input_color: String,
    pub pin_output_color: String,
    pub pin_power_color: String,
    pub pin_ground_color: String,
    pub pin_unassigned_color: String,
}

impl Theme {
    pub fn schematic_default() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            component_fill: "#F8FAFF".to_string(),
            component_border: "#C7D2E5".to_string(),
            component_text_color: "#1C2430".to_string(),
            wire_color: "#7A8AA6".to_string(),
            bend_marker_color: "#5B6B88".to_string(),
            label_background: "#FFFFFF".to_string(),
            label_text_color: "#1C2430".to_string(),
            pin_input_color: "#3B82C4".to_string(),
            pin_output_color: "#2F9E68".to_string(),
            pin_power_color: "#C4573B".to_string(),
            pin_ground_color: "#55606E".to_string(),
            pin_unassigned_color: "#A8B2C1".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#12161C".to_string(),
            component_fill: "#1C232D".to_string(),
            component_border: "#3A4656".to_string(),
            component_text_color: "#DCE3EC".to_string(),
            wire_color: "#8FA1BC".to_string(),
            bend_marker_color: "#AEBDD4".to_string(),
            label_background: "#1C232D".to_string(),
            label_text_color: "#DCE3EC".to_string(),
            pin_input_color: "#5FA8E0".to_string(),
            pin_output_color: "#57C08B".to_string(),
            pin_power_color: "#E08564".to_string(),
            pin_ground_color: "#7E8B9B".to_string(),
            pin_unassigned_color: "#5E6A79".to_string(),
        }
    }

    pub fn pin_color(&self, kind: PinKind) -> &str {
        match kind {
            PinKind::Input => &self.pin_input_color,
            PinKind::Output => &self.pin_output_color,
            PinKind::Power => &self.pin_power_color,
            PinKind::Ground => &self.pin_ground_color,
            PinKind::Unassigned => &self.pin_unassigned_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::schematic_default()
    }
}
