//! CSV rendering for report view-models.
//!
//! Convention: one header row; fields comma-joined; string fields
//! double-quoted (embedded quotes doubled); numeric fields with two
//! decimals; filename `<report-name>-<ISO-date-or-range>.csv`.

/// One field of a CSV row.
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Str(&'a str),
    Num(f64),
    Count(usize),
}

/// Incremental CSV document builder.
///
/// Row width is pinned to the header width; a mismatched row is a
/// programming error and panics in debug builds only.
#[derive(Debug)]
pub struct CsvDoc {
    columns: usize,
    out: String,
}

impl CsvDoc {
    pub fn new(header: &[&str]) -> Self {
        let mut out = String::new();
        out.push_str(&header.join(","));
        out.push('\n');
        Self {
            columns: header.len(),
            out,
        }
    }

    pub fn row(&mut self, fields: &[Field<'_>]) {
        debug_assert_eq!(fields.len(), self.columns, "csv row width mismatch");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            match field {
                Field::Str(s) => {
                    self.out.push('"');
                    self.out.push_str(&s.replace('"', "\"\""));
                    self.out.push('"');
                }
                Field::Num(n) => {
                    let n = if n.is_finite() { *n } else { 0.0 };
                    self.out.push_str(&format!("{n:.2}"));
                }
                Field::Count(c) => self.out.push_str(&c.to_string()),
            }
        }
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// `<report-name>-<ISO-date-or-range>.csv`
pub fn filename(report_name: &str, slug: &str) -> String {
    format!("{report_name}-{slug}.csv")
}
