#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table of string rows.
///
/// Widths are measured in characters, so accented programme names line up.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_len(cell))
                .max()
                .unwrap_or(0)
                .max(display_len(header))
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_len(&header_line));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                let padded = pad(&truncated, *width, numeric);
                if options.color {
                    colorize(&truncated, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

const MIN_WIDTH: usize = 4;

fn display_len(value: &str) -> usize {
    value.chars().count()
}

/// Shrink the widest columns one character at a time until the table fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_len(headers[*idx]).max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_len(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Counts and percentages are right-aligned.
fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim().trim_end_matches('%');
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit())
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_len(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Green for complete or successful, yellow for partial, red for empty or failed.
fn colorize(value: &str, padded: String) -> String {
    let code = match value.trim().to_ascii_lowercase().as_str() {
        "100%" | "true" | "saved" | "authenticated" => Some("32"),
        "0%" | "false" | "failed" | "denied" => Some("31"),
        v if v.ends_with('%') => Some("33"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
        None => padded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn columns_align_and_numbers_right_align() {
        let table = render_table(
            &["programme", "percent"],
            &[row(&["Law", "5%"]), row(&["Computer Science", "100%"])],
            PLAIN,
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "programme         percent");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "Law                    5%");
        assert_eq!(lines[3], "Computer Science     100%");
    }

    #[test]
    fn wide_tables_are_truncated_to_fit() {
        let table = render_table(
            &["programme", "requirement"],
            &[row(&["Medicine", "AAA including Chemistry and Biology, plus UCAT"])],
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        for line in table.lines() {
            assert!(display_len(line) <= 40, "{line}");
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn unicode_widths_count_characters() {
        let table = render_table(&["name"], &[row(&["Études"]), row(&["Law"])], PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(display_len(lines[1]), 6);
    }

    #[test]
    fn percentages_are_colored_by_completeness() {
        assert!(colorize("100%", "100%".into()).starts_with("\u{1b}[32m"));
        assert!(colorize("40%", "40%".into()).starts_with("\u{1b}[33m"));
        assert!(colorize("0%", "0%".into()).starts_with("\u{1b}[31m"));
        assert_eq!(colorize("Law", "Law".into()), "Law");
    }
}
