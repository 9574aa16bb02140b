use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use crate::model::ProjectType;

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

/// Maven projects get the full template; everything else falls back to replaying commands.
pub fn project_type_cell(project_type: ProjectType) -> Cell {
    let cell = Cell::new(project_type);
    match project_type {
        ProjectType::Maven => cell.fg(TableColor::Green),
        ProjectType::Gradle | ProjectType::Node => cell.fg(TableColor::Yellow),
        ProjectType::Generic => cell.fg(TableColor::DarkGrey),
    }
}

pub fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(TableColor::Red)
    } else {
        Cell::new(count)
    }
}

/// Highlights counts that need a manual follow-up.
pub fn attention_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(TableColor::Yellow)
    }
}
