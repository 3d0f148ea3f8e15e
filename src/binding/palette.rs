//! Automatic per-label colors.

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::Mutex;

/// Colors handed out to labels in first-seen order.
pub const COLOR_PALETTE: [&str; 8] = [
    "#2196F3", "#4CAF50", "#F44336", "#607D8B",
    "#673AB7", "#CDDC39", "#9E9E9E", "#9C27B0",
];

/// Label → palette slot memo. Slot `n` is the `n`-th distinct label seen;
/// the color wraps modulo the palette size.
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    assigned: HashMap<String, usize>,
}

/// The memo is shared between the widget host and the mappings it installs.
pub type SharedPalette = Arc<Mutex<ColorPalette>>;

impl ColorPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedPalette {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Color for `label`, assigning the next slot on first sight.
    pub fn color_for(&mut self, label: &str) -> &'static str {
        let next = self.assigned.len();
        let slot = *self.assigned.entry(label.to_owned()).or_insert(next);
        COLOR_PALETTE[slot % COLOR_PALETTE.len()]
    }

    /// Color already assigned to `label`, without assigning one.
    pub fn assigned_color(&self, label: &str) -> Option<&'static str> {
        self.assigned.get(label).map(|&slot| COLOR_PALETTE[slot % COLOR_PALETTE.len()])
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
