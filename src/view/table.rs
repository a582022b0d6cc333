//! Grid rendering: header, windowed body, footer.
//!
//! The body renders only the rows inside the current [`RowWindow`],
//! shifted so that the first visible line corresponds to the scroll
//! offset. Skipped rows are represented purely by that offset — the
//! scrollbar math lives in the windower, not here.

use crate::model::Applicant;
use crate::state::{ColumnSpec, GridState};
use crate::view::styles::GridStyles;
use crate::view_state::Windower;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Cap on wrapped lines per row in measured mode.
pub const MAX_CELL_LINES: usize = 3;

/// Pad or cut `text` to exactly `width` display columns, marking cuts
/// with an ellipsis.
pub fn truncate_cell(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{text}{}", " ".repeat(pad));
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    let pad = width.saturating_sub(used + 1);
    out.push_str(&" ".repeat(pad));
    out
}

/// Split `text` into display-width chunks of `width` columns, capped at
/// [`MAX_CELL_LINES`]; the final chunk is truncated if the cap bites.
/// Every chunk is padded to exactly `width` columns.
pub fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    if text.width() <= width {
        return vec![truncate_cell(text, width)];
    }
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            chunks.push(current);
            current = String::new();
            used = 0;
            if chunks.len() == MAX_CELL_LINES {
                break;
            }
        }
        current.push(ch);
        used += w;
    }
    if chunks.len() < MAX_CELL_LINES {
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks = chunks
            .into_iter()
            .map(|chunk| truncate_cell(&chunk, width))
            .collect();
    } else {
        // Hit the cap mid-text: mark the cut on the last kept chunk.
        let last = chunks
            .pop()
            .map(|chunk| truncate_cell(&format!("{chunk}…"), width));
        chunks = chunks
            .into_iter()
            .map(|chunk| truncate_cell(&chunk, width))
            .collect();
        chunks.extend(last);
    }
    chunks
}

/// The text content of one cell.
///
/// `flat_index` is the row's position in the flat loaded list (the `#`
/// column), independent of windowing.
pub fn cell_text(row: &Applicant, flat_index: usize, selected: bool, column: &str) -> String {
    match column {
        "select" => (if selected { "[x]" } else { "[ ]" }).to_string(),
        "index" => flat_index.to_string(),
        "name" => row.name.clone(),
        "age" => row.age.to_string(),
        "visits" => row.visits.to_string(),
        "city" => row.city.clone(),
        "email" => row.email.clone(),
        "status" => row.status.label().to_string(),
        "applied_at" => row.applied_at.format("%Y-%m-%d").to_string(),
        _ => String::new(),
    }
}

/// Rendered height of a row: 1 in estimated mode, otherwise the tallest
/// wrapped cell. This is the measurement fed back to the windower.
pub fn display_height(row: &Applicant, columns: &[&ColumnSpec], measured: bool) -> usize {
    if !measured {
        return 1;
    }
    columns
        .iter()
        .map(|spec| {
            let text = cell_text(row, 0, false, spec.id.as_str());
            wrap_cell(&text, spec.width as usize).len()
        })
        .max()
        .unwrap_or(1)
        .clamp(1, MAX_CELL_LINES)
}

/// Header line: labels in column order with sort markers; the column
/// cursor is highlighted, and the select column doubles as the
/// page-selection indicator.
pub fn header_line(grid: &GridState, styles: &GridStyles, col_cursor: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for (position, spec) in grid.columns().ordered().enumerate() {
        let mut label = match spec.id.as_str() {
            "select" => {
                if grid.page_fully_selected() {
                    "[x]".to_string()
                } else if grid.selected_count() > 0 {
                    "[~]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            _ => spec.label.to_string(),
        };
        if let Some(direction) = grid.sort().direction_of(&spec.id) {
            label.push(' ');
            label.push_str(direction.marker());
        }
        let style = if position == col_cursor {
            styles.column_cursor
        } else {
            styles.header
        };
        spans.push(Span::styled(
            truncate_cell(&label, spec.width as usize),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn row_lines(
    row: &Applicant,
    flat_index: usize,
    selected: bool,
    columns: &[&ColumnSpec],
    styles: &GridStyles,
    base: Style,
    height: usize,
) -> Vec<Line<'static>> {
    // Wrap each cell, then assemble line-by-line across columns.
    let wrapped: Vec<(Vec<String>, Style)> = columns
        .iter()
        .map(|spec| {
            let text = cell_text(row, flat_index, selected, spec.id.as_str());
            let chunks = if height > 1 {
                wrap_cell(&text, spec.width as usize)
            } else {
                vec![truncate_cell(&text, spec.width as usize)]
            };
            let style = match spec.id.as_str() {
                "status" => base.patch(styles.status(row.status)),
                _ => base,
            };
            (chunks, style)
        })
        .collect();

    (0..height)
        .map(|line_index| {
            let mut spans = Vec::new();
            for (spec, (chunks, style)) in columns.iter().zip(&wrapped) {
                let chunk = chunks
                    .get(line_index)
                    .cloned()
                    .unwrap_or_else(|| " ".repeat(spec.width as usize));
                spans.push(Span::styled(chunk, *style));
                spans.push(Span::styled(" ".to_string(), base));
            }
            Line::from(spans)
        })
        .collect()
}

/// Body lines for the current frame: the windowed rows, flattened to
/// lines and shifted by `scroll_offset - window.offset_y` so the first
/// emitted line is exactly the scroll position.
pub fn body_lines(
    grid: &GridState,
    windower: &Windower,
    styles: &GridStyles,
    row_cursor: usize,
) -> Vec<Line<'static>> {
    let window = windower.window();
    let range = grid.page_range();
    let page = grid.page_rows();
    let columns: Vec<&ColumnSpec> = grid.columns().ordered().collect();
    let measured = windower.params().measured;

    let mut lines = Vec::new();
    for index in window.indices() {
        let Some(row) = page.get(index) else {
            break;
        };
        let selected = grid.is_selected(row.id);
        let base = if index == row_cursor {
            styles.row_cursor
        } else if selected {
            styles.selected_row
        } else {
            Style::default()
        };
        let height = display_height(row, &columns, measured);
        lines.extend(row_lines(
            row,
            range.start + index,
            selected,
            &columns,
            styles,
            base,
            height,
        ));
    }

    let skip = windower.scroll_offset().saturating_sub(window.offset_y);
    lines
        .into_iter()
        .skip(skip)
        .take(windower.viewport_height())
        .collect()
}

/// Two footer lines: status summary and key hints.
pub fn footer_lines(grid: &GridState, styles: &GridStyles) -> Vec<Line<'static>> {
    let fetched = grid.total_fetched();
    let total = grid
        .total_db_rows()
        .map_or_else(|| "?".to_string(), |n| n.to_string());
    let pager = grid.pager();
    let mut summary = format!(
        "{} of {} rows selected · Page {}/{} (size {}) · loaded {}/{}",
        grid.selected_count(),
        fetched,
        pager.page_index() + 1,
        pager.page_count(fetched),
        pager.page_size(),
        fetched,
        total,
    );
    if let Some(spec) = grid.sort_spec() {
        summary.push_str(&format!(" · sort {spec}"));
    }

    let mut first = vec![Span::styled(summary, styles.footer)];
    if let Some(notice) = grid.notice() {
        first.push(Span::raw("  "));
        first.push(Span::styled(notice.to_string(), styles.notice));
    }

    let hints = "j/k move · h/l column · H/L reorder · s sort · space/v/a select · [/] page · z size · q quit";
    vec![
        Line::from(first),
        Line::from(Span::styled(hints.to_string(), styles.footer)),
    ]
}
