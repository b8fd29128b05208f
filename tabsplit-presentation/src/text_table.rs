use std::{borrow::Cow, fmt::Write};

const MIN_COLUMN_WIDTH: usize = 3;

#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Renders a pipe table. Cells beyond the header count are ignored.
    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        // A rule needs at least three dashes to keep its alignment colons.
        let mut col_widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| display_width(&escape_pipe(h)).max(MIN_COLUMN_WIDTH))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(display_width(&escape_pipe(cell)));
            }
        }

        let alignment = |i: usize| self.alignments.get(i).copied().unwrap_or_default();
        let mut table = String::with_capacity(64 * (self.rows.len() + 2));

        write_row(&mut table, self.headers, &col_widths, alignment);

        table.push('|');
        for (i, &width) in col_widths.iter().enumerate() {
            let rule = "-".repeat(width.saturating_sub(1));
            let _ = match alignment(i) {
                Alignment::Left => write!(&mut table, " :{rule} |"),
                Alignment::Center => {
                    write!(&mut table, " :{}: |", &rule[..rule.len().saturating_sub(1)])
                }
                Alignment::Right => write!(&mut table, " {rule}: |"),
            };
        }
        table.push('\n');

        for row in &self.rows {
            write_row(&mut table, row.as_ref(), &col_widths, alignment);
        }

        table
    }
}

fn write_row(
    table: &mut String,
    cells: &[Cow<'_, str>],
    col_widths: &[usize],
    alignment: impl Fn(usize) -> Alignment,
) {
    table.push('|');
    for (i, &width) in col_widths.iter().enumerate() {
        let cell = escape_pipe(cells.get(i).map(|c| c.as_ref()).unwrap_or(""));
        let padding = width.saturating_sub(display_width(&cell));
        let (left, right) = match alignment(i) {
            Alignment::Left => (0, padding),
            Alignment::Center => (padding / 2, padding - padding / 2),
            Alignment::Right => (padding, 0),
        };
        let _ = write!(
            table,
            " {}{}{} |",
            " ".repeat(left),
            cell,
            " ".repeat(right)
        );
    }
    table.push('\n');
}

// Terminal columns: wide (CJK, fullwidth) characters take two.
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if is_wide(c) { 2 } else { 1 })
        .sum()
}

fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{FFE0}'..='\u{FFE6}'
    )
}

fn escape_pipe(s: &str) -> Cow<'_, str> {
    if !s.contains('|') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace('|', "\\|"))
}
