//! Widget configuration.

use serde::{Deserialize, Serialize};

use crate::render::Layout;

/// Display options applied to every widget the host creates.
///
/// Deserializes from a partial document; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// CSS-style widget appearance (`{"height": "800px", ...}`).
    pub widget_layout: Option<serde_json::Value>,
    /// Whether the graph overview panel is enabled.
    pub overview_enabled: Option<bool>,
    /// Side panel to open initially; closed when unset.
    pub context_start_with: Option<String>,
    /// License payload for domains the widget does not cover by default.
    pub license: Option<serde_json::Value>,
    /// Layout used when `show_cypher` is not given one.
    pub layout: Layout,
}

impl WidgetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_widget_layout(mut self, css: serde_json::Value) -> Self {
        self.widget_layout = Some(css);
        self
    }

    pub fn with_overview(mut self, enabled: bool) -> Self {
        self.overview_enabled = Some(enabled);
        self
    }

    pub fn with_context_start_with(mut self, panel: impl Into<String>) -> Self {
        self.context_start_with = Some(panel.into());
        self
    }

    pub fn with_license(mut self, license: serde_json::Value) -> Self {
        self.license = Some(license);
        self
    }
}
