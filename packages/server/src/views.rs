//! Compile-time registry of dashboard pages.
//!
//! Each page is defined in a TOML file under `views/`. The registry embeds
//! these at compile time and exposes them in navigation order via
//! [`all_views`].

use ev_demand_server_models::ApiView;
use serde::Deserialize;

/// A dashboard page definition loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewDefinition {
    /// Unique identifier (e.g., `"prediction"`).
    pub id: String,
    /// Navigation label.
    pub title: String,
    /// Navigation icon.
    pub icon: String,
    /// Position in the navigation list, lowest first.
    pub order: u32,
    /// Static markdown content.
    #[serde(default)]
    pub body: Option<String>,
}

impl From<ViewDefinition> for ApiView {
    fn from(view: ViewDefinition) -> Self {
        Self {
            id: view.id,
            title: view.title,
            icon: view.icon,
            body: view.body,
        }
    }
}

const VIEW_TOMLS: &[(&str, &str)] = &[
    ("home", include_str!("../views/home.toml")),
    ("dataset", include_str!("../views/dataset.toml")),
    ("insights", include_str!("../views/insights.toml")),
    ("prediction", include_str!("../views/prediction.toml")),
    ("about", include_str!("../views/about.toml")),
];

#[cfg(test)]
const EXPECTED_VIEW_COUNT: usize = 5;

/// Returns every page, sorted by `order`.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_views() -> Vec<ViewDefinition> {
    let mut views: Vec<ViewDefinition> = VIEW_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse view '{name}': {e}"))
        })
        .collect();
    views.sort_by_key(|v| v.order);
    views
}
