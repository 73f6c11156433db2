//! Markdown document building: canonical markdown → renderable blocks.
//!
//! A single pass over lines, threading one explicit state record through
//! the fold so every transition (open list, open table, overridden-section
//! skip, first-workstream anchor) is auditable in isolation. Per-line
//! classification runs in a fixed priority order; an open list or table is
//! always flushed before a block of a different kind is emitted.

pub mod inline;
pub mod sections;
pub mod table;

use crate::types::{Block, SectionOverride, Span, TableRow};
use inline::format_spans;

/// Table accumulating rows until a non-table line flushes it.
struct OpenTable {
    headers: Vec<Vec<Span>>,
    rows: Vec<TableRow>,
}

/// Builder state threaded through the line fold.
#[derive(Default)]
struct BuilderState {
    blocks: Vec<Block>,
    open_list: Option<Vec<Vec<Span>>>,
    open_table: Option<OpenTable>,
    /// Consuming lines of a section whose rendering was overridden.
    skipping_section: bool,
    /// Controls anchor assignment: the first workstream heading gets the
    /// fixed anchor, later ones get slug ids.
    first_section_heading_seen: bool,
    /// Inside a whitelisted subsection: bare lines are list items.
    forced_list: bool,
}

impl BuilderState {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn flush_list(&mut self) {
        if let Some(items) = self.open_list.take() {
            if !items.is_empty() {
                self.blocks.push(Block::List { items });
            }
        }
    }

    fn flush_table(&mut self) {
        if let Some(t) = self.open_table.take() {
            self.blocks.push(Block::Table {
                headers: t.headers,
                rows: t.rows,
            });
        }
    }
}

/// Tokenize canonical markdown into an ordered block sequence.
///
/// `replacement` names a section (by major-header title) whose raw content
/// is discarded; in its place an H2 plus the supplied block are emitted,
/// wrapped in [`Block::Replacement`]. Blocks come out in source order and
/// any still-open list or table is flushed at end of input.
pub fn build_document(markdown: &str, replacement: Option<&SectionOverride>) -> Vec<Block> {
    let mut st = BuilderState::default();
    for raw_line in markdown.lines() {
        process_line(&mut st, raw_line.trim(), replacement);
    }
    st.flush_list();
    st.flush_table();
    st.blocks
}

fn process_line(st: &mut BuilderState, line: &str, replacement: Option<&SectionOverride>) {
    // Blank lines terminate any open list or table.
    if line.is_empty() {
        st.flush_list();
        st.flush_table();
        return;
    }

    // While skipping an overridden section, only a major header with a
    // different title re-opens normal processing; everything else in the
    // section (including its raw table) is discarded.
    if st.skipping_section {
        let leaves_section = sections::major_header_title(line)
            .map(|title| !title_matches(title, replacement))
            .unwrap_or(false);
        if !leaves_section {
            return;
        }
        st.skipping_section = false;
    }

    // Table rows accumulate; separator rows are skipped outright.
    if sections::is_table_row(line) {
        if sections::is_separator_row(line) {
            return;
        }
        st.flush_list();
        let cells: Vec<Vec<Span>> = sections::split_table_cells(line)
            .into_iter()
            .map(format_spans)
            .collect();
        match st.open_table.as_mut() {
            None => {
                st.open_table = Some(OpenTable {
                    headers: cells,
                    rows: Vec::new(),
                });
            }
            Some(t) => {
                let zebra = t.rows.len() % 2 == 1;
                t.rows.push(TableRow { cells, zebra });
            }
        }
        return;
    }

    // A non-table line closes an open table before anything else happens.
    if st.open_table.is_some() {
        st.flush_table();
    }

    // The first content line of the document is its title, unless it is
    // the purpose line.
    if st.blocks.is_empty()
        && st.open_list.is_none()
        && !line.starts_with(sections::PURPOSE_PREFIX)
    {
        let title = sections::strip_heading_decoration(line);
        st.push(Block::Heading {
            level: 1,
            id: None,
            text: format_spans(title),
        });
        return;
    }

    if let Some(title) = sections::major_header_title(line) {
        st.flush_list();
        st.forced_list = false;
        if title_matches(title, replacement) {
            let ov = replacement.expect("title only matches when an override is present");
            st.push(Block::Heading {
                level: 2,
                id: Some(sections::slugify(title)),
                text: format_spans(title),
            });
            st.push(Block::Replacement {
                content: Box::new(ov.block.clone()),
            });
            st.skipping_section = true;
            log::debug!("section '{}' replaced; discarding its raw content", title);
            return;
        }
        st.push(Block::Heading {
            level: 2,
            id: Some(sections::slugify(title)),
            text: format_spans(title),
        });
        return;
    }

    if let Some(title) = sections::workstream_title(line) {
        st.flush_list();
        st.forced_list = false;
        let id = if st.first_section_heading_seen {
            sections::slugify(title)
        } else {
            st.first_section_heading_seen = true;
            sections::FIRST_WORKSTREAM_ANCHOR.to_string()
        };
        st.push(Block::Heading {
            level: 3,
            id: Some(id),
            text: format_spans(title),
        });
        return;
    }

    if let Some(spec) = sections::subsection_for_line(line) {
        st.flush_list();
        st.push(Block::Heading {
            level: 4,
            id: None,
            text: format_spans(&format!("{} {}", spec.icon, spec.title)),
        });
        st.forced_list = true;
        return;
    }

    if sections::is_horizontal_rule(line) {
        st.flush_list();
        st.push(Block::Divider);
        return;
    }

    if let Some(rest) = line.strip_prefix(sections::PURPOSE_PREFIX) {
        st.flush_list();
        st.push(Block::Paragraph {
            text: format_spans(rest.trim()),
            italic: false,
        });
        return;
    }

    // List content: explicit bullets anywhere, bare lines in forced mode.
    let bullet = sections::bullet_content(line);
    if st.forced_list || bullet.is_some() {
        let content = bullet.unwrap_or(line);
        if sections::is_sentinel_line(content) {
            // The empty-section sentinel always terminates a list.
            st.flush_list();
            st.push(Block::Paragraph {
                text: format_spans(content),
                italic: true,
            });
            st.forced_list = false;
            return;
        }
        st.open_list
            .get_or_insert_with(Vec::new)
            .push(format_spans(content));
        return;
    }

    st.flush_list();
    st.push(Block::Paragraph {
        text: format_spans(line),
        italic: false,
    });
}

fn title_matches(title: &str, replacement: Option<&SectionOverride>) -> bool {
    replacement
        .map(|ov| ov.title.eq_ignore_ascii_case(title.trim()))
        .unwrap_or(false)
}
