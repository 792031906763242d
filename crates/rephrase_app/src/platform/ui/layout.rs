use ratatui::layout::{Constraint, Layout, Rect};

use super::constants::{INPUT_HEIGHT, OUTPUT_COLUMNS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub toolbar: Rect,
    pub input: Rect,
    /// One area per output box, in style order.
    pub outputs: Vec<Rect>,
    pub status: Rect,
}

pub fn compute(area: Rect, output_count: usize) -> ScreenLayout {
    let [title, toolbar, input, grid, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    ScreenLayout {
        title,
        toolbar,
        input,
        outputs: grid_cells(grid, output_count),
        status,
    }
}

/// Splits `area` into rows of `OUTPUT_COLUMNS` equally sized cells. A short
/// last row stretches its cells across the full width.
fn grid_cells(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(OUTPUT_COLUMNS);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);

    let mut cells = Vec::with_capacity(count);
    for (row_idx, row) in row_areas.iter().enumerate() {
        let in_row = (count - row_idx * OUTPUT_COLUMNS).min(OUTPUT_COLUMNS);
        let columns =
            Layout::horizontal(vec![Constraint::Ratio(1, in_row as u32); in_row]).split(*row);
        cells.extend(columns.iter().copied());
    }
    cells
}
