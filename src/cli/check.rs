//! `check` command - parse a notebook once and print a per-cell summary.

use std::path::Path;

use anyhow::{Context, Result};

use crate::notebook::parse_notebook;

pub fn run(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let cells =
        parse_notebook(&bytes).with_context(|| format!("cannot parse {}", path.display()))?;

    crate::log!("check"; "{}: {} cell{}",
        path.display(),
        cells.len(),
        if cells.len() == 1 { "" } else { "s" });

    for (index, cell) in cells.iter().enumerate() {
        let order = cell
            .execution_order
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{index:>4}  {:<6} {:<10} [{order:>3}]  {:>3} out  {}",
            cell.kind.label(),
            cell.language,
            cell.outputs.len(),
            preview(&cell.source)
        );

        for output in &cell.outputs {
            let mimes: Vec<&str> = output.items.iter().map(|item| item.mime()).collect();
            crate::debug!("check"; "  {:?}: {}", output.kind, mimes.join(", "));
        }
    }

    Ok(())
}

/// First line of the source, truncated for display.
fn preview(source: &str) -> String {
    const MAX: usize = 48;
    let first = source.lines().next().unwrap_or("");
    let mut out: String = first.chars().take(MAX).collect();
    if first.chars().count() > MAX {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_first_line_only() {
        assert_eq!(preview("a = 1\nb = 2"), "a = 1");
    }

    #[test]
    fn test_preview_empty_source() {
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(80);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 51);
    }
}
