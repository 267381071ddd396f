use comfy_table::{Cell, CellAlignment, Table, modifiers, presets};
use sunny_webconnect::YieldSample;

#[must_use]
pub fn build_yield_table(samples: &[YieldSample]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Time", "Cumulative yield"]);
    for sample in samples {
        table.add_row(vec![
            Cell::new(sample.time.format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{} Wh", sample.value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
