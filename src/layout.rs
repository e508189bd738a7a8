//! Dashboard grid placement
//!
//! Panels tile a two-column grid in input order: left to right, then top to
//! bottom. Cells are fixed at 12x9 grid units, matching the width and height
//! the panel template declares in its `gridPos` block. Identifiers count up
//! densely from [`FIRST_PANEL_ID`].

/// Number of panel columns per dashboard row.
pub const GRID_COLUMNS: u64 = 2;

/// Panel width in grid units (half of Grafana's 24-unit row).
pub const PANEL_WIDTH: u64 = 12;

/// Panel height in grid units.
pub const PANEL_HEIGHT: u64 = 9;

/// Identifier of the first generated panel. The consuming dashboard keeps
/// ids 0 and 1 for its fixed header panels, so generated panels start at 2.
pub const FIRST_PANEL_ID: u64 = 2;

/// Grid offset of a panel within the dashboard layout, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Horizontal offset
    pub x: u64,
    /// Vertical offset
    pub y: u64,
}

impl GridPosition {
    /// Position of the panel at `index` (zero-based input order).
    pub fn for_index(index: usize) -> Self {
        let index = index as u64;
        Self {
            x: (index % GRID_COLUMNS) * PANEL_WIDTH,
            y: (index / GRID_COLUMNS) * PANEL_HEIGHT,
        }
    }
}

/// Identifier assigned to the panel at `index`: dense, in input order,
/// starting at [`FIRST_PANEL_ID`]. No gaps, no reordering.
pub fn panel_id(index: usize) -> u64 {
    index as u64 + FIRST_PANEL_ID
}
