use analytics::MetricsSnapshot;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use normalizer::{ColumnSource, ResolutionMap, TradeRecord};
use reporter::kpi_lines;

fn table_with_header(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(value: Option<f64>) -> Cell {
    let text = value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Which input column each canonical field was bound to, then the fields
/// nothing matched.
pub fn resolution_table(resolution: &ResolutionMap) -> Table {
    let mut table = table_with_header(vec!["Field", "Column"]);
    for (field, column) in resolution.iter() {
        let column = match resolution.source(field) {
            Some(ColumnSource::Derived) => format!("{} (derived)", column),
            _ => column.to_string(),
        };
        table.add_row(vec![field.name().to_string(), column]);
    }
    for field in resolution.unresolved() {
        table.add_row(vec![field.name().to_string(), "(not found)".to_string()]);
    }
    table
}

pub fn kpi_table(snapshot: &MetricsSnapshot) -> Table {
    let mut table = table_with_header(vec!["Metric", "Value"]);
    for line in kpi_lines(snapshot) {
        table.add_row(vec![
            Cell::new(line.label),
            Cell::new(line.value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn trades_table(trades: &[TradeRecord]) -> Table {
    let mut table = table_with_header(vec![
        "#", "Date", "Market", "Direction", "Entry", "Exit", "Qty", "PnL", "R:R",
    ]);
    for trade in trades {
        let date = trade
            .date
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string());
        table.add_row(vec![
            Cell::new(trade.row + 1),
            Cell::new(date),
            Cell::new(&trade.market),
            Cell::new(&trade.direction),
            number(trade.entry),
            number(trade.exit_price),
            number(trade.quantity),
            number(trade.pnl),
            number(trade.risk_reward),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CanonicalField;

    #[test]
    fn kpi_table_has_a_row_per_line() {
        let snapshot = MetricsSnapshot::new();
        let table = kpi_table(&snapshot);
        assert_eq!(table.row_iter().count(), kpi_lines(&snapshot).len());
    }

    #[test]
    fn resolution_table_lists_every_field() {
        let resolution = normalizer::resolve(&["pnl".to_string()]);
        let table = resolution_table(&resolution);
        assert_eq!(table.row_iter().count(), CanonicalField::ALL.len());
        assert!(table.to_string().contains("(not found)"));
    }

    #[test]
    fn missing_numbers_render_as_dash() {
        let rendered = trades_table(&[TradeRecord {
            row: 0,
            date: None,
            market: "ES".to_string(),
            direction: "Long".to_string(),
            entry: None,
            stop_loss: None,
            take_profit: None,
            exit_price: None,
            pnl: Some(12.5),
            risk_reward: None,
            quantity: None,
            notes: String::new(),
        }])
        .to_string();
        assert!(rendered.contains("12.50"));
        assert!(rendered.contains('-'));
    }
}
