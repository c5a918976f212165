//! Plain-text rendering shared by the pages.
//!
//! Every page view is `Serialize + Display`: `--json` prints the former,
//! the terminal gets the latter.

use megapc_core::chart::{ChartKind, ChartView};
use serde::Serialize;
use std::fmt::{self, Display, Write};

use crate::error::{ConsoleError, ConsoleResult};

/// Renders a page view as pretty JSON or as text.
pub fn output<T: Serialize + Display>(value: &T, json: bool) -> ConsoleResult<String> {
    if json {
        serde_json::to_string_pretty(value)
            .map_err(|e| ConsoleError::internal(format!("Failed to encode output: {}", e)))
    } else {
        Ok(value.to_string())
    }
}

/// One headline figure on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    /// Caption under the value, e.g. "transactions".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'static str>,
}

impl StatCard {
    pub fn new(title: &'static str, value: impl ToString) -> Self {
        StatCard {
            title,
            value: value.to_string(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: &'static str) -> Self {
        self.caption = Some(caption);
        self
    }
}

/// Section title underlined with `=`.
pub fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "=".repeat(title.chars().count()))
}

pub fn cards(f: &mut fmt::Formatter<'_>, cards: &[StatCard]) -> fmt::Result {
    let width = cards
        .iter()
        .map(|c| c.title.chars().count())
        .max()
        .unwrap_or(0);
    for card in cards {
        write!(f, "  {:<width$}  {}", card.title, card.value, width = width)?;
        match card.caption {
            Some(caption) => writeln!(f, " {}", caption)?,
            None => writeln!(f)?,
        }
    }
    Ok(())
}

/// Left-aligned table with a dashed rule under the header.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    write_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "  {}", rule.join("  "));
    for row in rows {
        write_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
        .collect();
    let _ = writeln!(out, "  {}", padded.join("  ").trim_end());
}

/// Chart as a table: the category column plus one column per series.
///
/// Pie charts also list each slice's palette color.
pub fn chart(view: &ChartView) -> String {
    let mut out = format!("{} ({:?})\n", view.title, view.kind);
    if view.is_empty() {
        out.push_str("  No data\n");
        return out;
    }

    let mut headers: Vec<&str> = vec![view.x_axis];
    headers.extend(view.legend.iter().map(|(label, _)| *label));
    let is_pie = view.kind == ChartKind::Pie && !view.palette.is_empty();
    if is_pie {
        headers.push("color");
    }

    let rows: Vec<Vec<String>> = view
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let mut row = vec![point.x.clone()];
            row.extend(point.values.iter().map(|v| format_value(v.value)));
            if is_pie {
                row.push(view.palette[i % view.palette.len()].to_string());
            }
            row
        })
        .collect();

    out.push_str(&table(&headers, &rows));
    out
}

/// Whole numbers print bare; everything else gets two decimals.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.2}", value)
    }
}
