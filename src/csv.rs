//! Minimal RFC 4180 CSV writer for the scripts' spreadsheet exports.

use std::io::{self, Write};

pub struct CsvWriter<W: Write> {
    inner: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record<S: AsRef<str>>(&mut self, fields: &[S]) -> io::Result<()> {
        let line = fields
            .iter()
            .map(|field| escape_field(field.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.inner, "{}", line)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: &[&[&str]]) -> String {
        let mut writer = CsvWriter::new(Vec::new());
        for &record in records {
            writer.write_record(record).unwrap();
        }
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_fields() {
        assert_eq!(render(&[&["a", "b", "c"]]), "a,b,c\n");
    }

    #[test]
    fn test_quotes_when_needed() {
        assert_eq!(
            render(&[&["x,y", "say \"hi\"", "line\nbreak", "plain"]]),
            "\"x,y\",\"say \"\"hi\"\"\",\"line\nbreak\",plain\n"
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(render(&[&["", "b", ""]]), ",b,\n");
    }
}
