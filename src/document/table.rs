//! Next-steps table rendering.
//!
//! Turns the decoded action items into the fixed six-column table block
//! the presentation layer injects in place of the raw NEXT STEPS section.
//! Independent of markdown: the input is already structured.

use crate::document::inline::format_spans;
use crate::types::{ActionItem, Block, Span, TableRow};

/// Fixed header row of the next-steps table.
pub const TABLE_HEADERS: [&str; 6] = [
    "Department",
    "Owner",
    "Task",
    "Due Date",
    "Status",
    "Status Notes",
];

/// Placeholder cell for an empty table.
const PLACEHOLDER: &str = "—";

/// Render action items as a table block.
///
/// An empty item list renders one row of placeholder cells rather than a
/// headers-only table. With `use_status_glyphs` the status cell carries a
/// colored indicator; otherwise the literal status label. Due dates render
/// in their display form ("Sep 2, 2025"), falling back to the wire value.
pub fn render_action_table(items: &[ActionItem], use_status_glyphs: bool) -> Block {
    let headers = TABLE_HEADERS
        .iter()
        .map(|h| vec![Span::plain(*h)])
        .collect();

    if items.is_empty() {
        let cells = (0..TABLE_HEADERS.len())
            .map(|_| vec![Span::plain(PLACEHOLDER)])
            .collect();
        return Block::Table {
            headers,
            rows: vec![TableRow {
                cells,
                zebra: false,
            }],
        };
    }

    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let status = if use_status_glyphs {
                item.status.glyph()
            } else {
                item.status.label()
            };
            TableRow {
                cells: vec![
                    format_spans(&item.department),
                    format_spans(&item.owner),
                    format_spans(&item.task),
                    format_spans(&item.due_date_display()),
                    vec![Span::plain(status)],
                    format_spans(&item.status_notes),
                ],
                zebra: i % 2 == 1,
            }
        })
        .collect();

    Block::Table { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionStatus;

    fn item(status: ActionStatus) -> ActionItem {
        ActionItem {
            department: "XD".to_string(),
            owner: "Casey".to_string(),
            task: "Mock up designs".to_string(),
            due_date: "2025-09-02".to_string(),
            status,
            status_notes: "ok".to_string(),
        }
    }

    fn rows_of(block: Block) -> Vec<TableRow> {
        match block {
            Block::Table { rows, .. } => rows,
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_due_date_cell_uses_display_form() {
        let rows = rows_of(render_action_table(&[item(ActionStatus::Green)], true));
        assert_eq!(rows[0].cells[3], vec![Span::plain("Sep 2, 2025")]);

        let mut vague = item(ActionStatus::Green);
        vague.due_date = "next Friday".to_string();
        let rows = rows_of(render_action_table(&[vague], true));
        assert_eq!(rows[0].cells[3], vec![Span::plain("next Friday")]);
    }

    #[test]
    fn test_empty_items_render_one_placeholder_row() {
        let rows = rows_of(render_action_table(&[], true));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), 6);
        for cell in &rows[0].cells {
            assert_eq!(cell, &vec![Span::plain("—")]);
        }
    }

    #[test]
    fn test_header_row_is_fixed() {
        match render_action_table(&[], false) {
            Block::Table { headers, .. } => {
                let titles: Vec<&str> = headers
                    .iter()
                    .map(|cell| cell[0].text.as_str())
                    .collect();
                assert_eq!(
                    titles,
                    vec!["Department", "Owner", "Task", "Due Date", "Status", "Status Notes"]
                );
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_status_glyphs_enabled() {
        let items = vec![
            item(ActionStatus::Green),
            item(ActionStatus::Amber),
            item(ActionStatus::Red),
            item(ActionStatus::Unspecified),
        ];
        let rows = rows_of(render_action_table(&items, true));
        let statuses: Vec<&str> = rows.iter().map(|r| r.cells[4][0].text.as_str()).collect();
        assert_eq!(statuses, vec!["🟢", "🟡", "🔴", "—"]);
    }

    #[test]
    fn test_status_literals_when_glyphs_disabled() {
        let items = vec![item(ActionStatus::Green), item(ActionStatus::Unspecified)];
        let rows = rows_of(render_action_table(&items, false));
        assert_eq!(rows[0].cells[4][0].text, "GREEN");
        assert_eq!(rows[1].cells[4][0].text, "—");
    }

    #[test]
    fn test_zebra_alternates_per_row() {
        let items = vec![
            item(ActionStatus::Green),
            item(ActionStatus::Green),
            item(ActionStatus::Green),
        ];
        let rows = rows_of(render_action_table(&items, true));
        let flags: Vec<bool> = rows.iter().map(|r| r.zebra).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_cell_text_gets_inline_formatting() {
        let mut it = item(ActionStatus::Green);
        it.task = "Ship the **beta** build".to_string();
        let rows = rows_of(render_action_table(&[it], true));
        assert_eq!(
            rows[0].cells[2],
            vec![
                Span::plain("Ship the "),
                Span::strong("beta"),
                Span::plain(" build"),
            ]
        );
    }

    #[test]
    fn test_row_order_follows_source_order() {
        let mut first = item(ActionStatus::Green);
        first.owner = "Avery".to_string();
        let mut second = item(ActionStatus::Red);
        second.owner = "Blake".to_string();
        let rows = rows_of(render_action_table(&[first, second], true));
        assert_eq!(rows[0].cells[1][0].text, "Avery");
        assert_eq!(rows[1].cells[1][0].text, "Blake");
    }
}
