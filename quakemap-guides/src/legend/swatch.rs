use itertools::Itertools;
use quakemap_common::types::HexColor;
use quakemap_style::DepthColorTable;
use serde::Serialize;

use crate::legend::format_bound;

/// One colored swatch and the depth interval it stands for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: HexColor,
    pub lower_bound: f64,
    /// `None` for the open-ended last entry
    pub upper_bound: Option<f64>,
}

impl LegendEntry {
    /// Human readable range, e.g. `10–30 km` or `90+ km`
    pub fn label(&self, unit: &str) -> String {
        let lower = format_bound(self.lower_bound);
        match self.upper_bound {
            Some(upper) => format!("{lower}\u{2013}{} {unit}", format_bound(upper)),
            None => format!("{lower}+ {unit}"),
        }
    }
}

/// A legend entry reduced to what a renderer displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwatchLegendConfig {
    pub title: Option<String>,

    /// Unit appended to every label
    pub unit: String,

    /// Lower bound shown for the first (shallowest) entry, which is open-ended below.
    /// Should lie below that entry's upper bound.
    pub origin: f64,
}

impl Default for SwatchLegendConfig {
    fn default() -> Self {
        Self {
            title: None,
            unit: "km".to_string(),
            origin: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwatchLegend {
    pub title: Option<String>,
    pub unit: String,
    pub entries: Vec<LegendEntry>,
}

impl SwatchLegend {
    pub fn rows(&self) -> Vec<LegendRow> {
        self.entries
            .iter()
            .map(|entry| LegendRow {
                color: entry.color.to_hex(),
                label: entry.label(&self.unit),
            })
            .collect()
    }

    /// Plain text rendering, one entry per line
    pub fn to_text(&self) -> String {
        let mut rows = self
            .rows()
            .into_iter()
            .map(|row| format!("{}  {}", row.color, row.label));
        match &self.title {
            Some(title) => std::iter::once(title.clone()).chain(rows).join("\n"),
            None => rows.join("\n"),
        }
    }
}

/// Builds the legend from the same table that colors the markers, so the two cannot drift.
pub fn make_depth_legend(table: &DepthColorTable, config: &SwatchLegendConfig) -> SwatchLegend {
    let classifier = table.classifier();
    let entries = table
        .colors()
        .iter()
        .enumerate()
        .filter_map(|(i, color)| {
            let (lower, upper) = classifier.extent(i)?;
            Some(LegendEntry {
                color: *color,
                lower_bound: lower.unwrap_or(config.origin),
                upper_bound: upper,
            })
        })
        .collect();

    SwatchLegend {
        title: config.title.clone(),
        unit: config.unit.clone(),
        entries,
    }
}
