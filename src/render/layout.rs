//! Named layout algorithms the renderer understands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Automatic graph arrangement, selected by name and executed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Circular,
    CircularStraightLine,
    Hierarchic,
    #[default]
    Organic,
    InteractiveOrganic,
    Orthogonal,
    Radial,
    Tree,
    Map,
    OrthogonalEdgeRouter,
    OrganicEdgeRouter,
}

impl Layout {
    pub const ALL: [Layout; 11] = [
        Layout::Circular,
        Layout::CircularStraightLine,
        Layout::Hierarchic,
        Layout::Organic,
        Layout::InteractiveOrganic,
        Layout::Orthogonal,
        Layout::Radial,
        Layout::Tree,
        Layout::Map,
        Layout::OrthogonalEdgeRouter,
        Layout::OrganicEdgeRouter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Circular => "circular",
            Layout::CircularStraightLine => "circular_straight_line",
            Layout::Hierarchic => "hierarchic",
            Layout::Organic => "organic",
            Layout::InteractiveOrganic => "interactive_organic",
            Layout::Orthogonal => "orthogonal",
            Layout::Radial => "radial",
            Layout::Tree => "tree",
            Layout::Map => "map",
            Layout::OrthogonalEdgeRouter => "orthogonal_edge_router",
            Layout::OrganicEdgeRouter => "organic_edge_router",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::ALL.iter()
            .copied()
            .find(|l| l.name() == s)
            .ok_or_else(|| Error::InvalidLayout(s.to_owned()))
    }
}
