//! Plain-text table format, one record per size pair:
//!
//! ```text
//! [*3,3*]
//! 0.0,1.0,2.0,...,9.0,
//! 0.05,0.1,0.2,...,1.0,
//! #####
//! ```
//!
//! Values are comma-terminated. Records may appear in any order.

use std::io::{BufRead, Write};

use crate::distribution::{DistributionTable, SampleSizePair};
use crate::error::{MannWhitneyError, Result};

pub const LABEL_OPEN: &str = "[*";
pub const LABEL_CLOSE: &str = "*]";
pub const SENTINEL: &str = "#####";

// Shortest representation that parses back to the same f64, always with a
// decimal point ("0.0", "0.35").
fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

fn write_values<W: Write>(writer: &mut W, values: &[f64]) -> std::io::Result<()> {
    for &value in values {
        write!(writer, "{},", format_value(value))?;
    }
    writeln!(writer)
}

pub fn write_record<W: Write>(
    writer: &mut W,
    pair: &SampleSizePair,
    table: &DistributionTable,
) -> Result<()> {
    writeln!(writer, "{}{}{}", LABEL_OPEN, pair.key(), LABEL_CLOSE)?;
    write_values(writer, table.u_crit())?;
    write_values(writer, table.w_cum())?;
    writeln!(writer, "{}", SENTINEL)?;
    Ok(())
}

pub fn write_tables<'a, W, I>(writer: &mut W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a SampleSizePair, &'a DistributionTable)>,
{
    for (pair, table) in records {
        write_record(writer, pair, table)?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_label(line: &str, line_no: usize) -> Result<SampleSizePair> {
    line.strip_prefix(LABEL_OPEN)
        .and_then(|rest| rest.strip_suffix(LABEL_CLOSE))
        .and_then(SampleSizePair::from_key)
        .ok_or_else(|| MannWhitneyError::format(line_no, format!("bad label '{}'", line)))
}

fn parse_values(line: &str, line_no: usize) -> Result<Vec<f64>> {
    let body = line.strip_suffix(',').unwrap_or(line);
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    body.split(',')
        .map(|token| {
            token.trim().parse::<f64>().map_err(|_| {
                MannWhitneyError::format(line_no, format!("unparsable number '{}'", token))
            })
        })
        .collect()
}

struct OpenRecord {
    pair: SampleSizePair,
    label_line: usize,
    data: Vec<(usize, String)>,
}

impl OpenRecord {
    fn close(self, sentinel_line: usize) -> Result<(SampleSizePair, DistributionTable)> {
        let [(u_line, u_text), (w_line, w_text)] =
            <[(usize, String); 2]>::try_from(self.data).map_err(|data| {
                MannWhitneyError::format(
                    sentinel_line,
                    format!(
                        "record '{}' has {} data lines, expected 2",
                        self.pair,
                        data.len()
                    ),
                )
            })?;
        let u_crit = parse_values(&u_text, u_line)?;
        let w_cum = parse_values(&w_text, w_line)?;
        let table = DistributionTable::new(u_crit, w_cum).map_err(|err| match err {
            MannWhitneyError::Format { reason, .. } => MannWhitneyError::Format {
                line: self.label_line,
                reason: format!("record '{}': {}", self.pair, reason),
            },
            other => other,
        })?;
        Ok((self.pair, table))
    }
}

/// Reads every record in file order. Any malformed record aborts the parse.
///
/// Blank lines between records are skipped. Monotonicity of the columns is
/// not checked.
pub fn parse_tables<R: BufRead>(reader: R) -> Result<Vec<(SampleSizePair, DistributionTable)>> {
    let mut records = Vec::new();
    let mut open: Option<OpenRecord> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let line = line.trim();

        if line.starts_with(LABEL_OPEN) {
            if let Some(record) = &open {
                return Err(MannWhitneyError::format(
                    record.label_line,
                    format!("record '{}' is missing its '{}' terminator", record.pair, SENTINEL),
                ));
            }
            open = Some(OpenRecord {
                pair: parse_label(line, line_no)?,
                label_line: line_no,
                data: Vec::with_capacity(2),
            });
        } else if line == SENTINEL {
            let record = open.take().ok_or_else(|| {
                MannWhitneyError::format(line_no, "terminator without a preceding label")
            })?;
            records.push(record.close(line_no)?);
        } else if line.is_empty() {
            if open.is_some() {
                return Err(MannWhitneyError::format(line_no, "blank line inside a record"));
            }
        } else {
            match open.as_mut() {
                Some(record) => record.data.push((line_no, line.to_string())),
                None => {
                    return Err(MannWhitneyError::format(line_no, "data outside of a record"));
                }
            }
        }
    }

    if let Some(record) = open {
        return Err(MannWhitneyError::format(
            record.label_line,
            format!("record '{}' is missing its '{}' terminator", record.pair, SENTINEL),
        ));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::build_table;
    use std::io::Cursor;

    fn parse_str(text: &str) -> Result<Vec<(SampleSizePair, DistributionTable)>> {
        parse_tables(Cursor::new(text))
    }

    #[test]
    fn test_write_record_layout() {
        let pair = SampleSizePair::new(1, 1);
        let table = build_table(pair);
        let mut out = Vec::new();
        write_record(&mut out, &pair, &table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "[*1,1*]\n0.0,1.0,\n0.5,1.0,\n#####\n");
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let pairs = [SampleSizePair::new(3, 4), SampleSizePair::new(5, 2)];
        let tables: Vec<DistributionTable> = pairs.iter().map(|&p| build_table(p)).collect();

        let mut out = Vec::new();
        write_tables(&mut out, pairs.iter().zip(tables.iter())).unwrap();
        let parsed = parse_tables(Cursor::new(out)).unwrap();

        assert_eq!(parsed.len(), 2);
        for ((pair, table), (parsed_pair, parsed_table)) in
            pairs.iter().zip(tables.iter()).zip(parsed.iter())
        {
            assert_eq!(pair, parsed_pair);
            assert_eq!(table.u_crit(), parsed_table.u_crit());
            assert_eq!(table.w_cum(), parsed_table.w_cum());
        }
    }

    #[test]
    fn test_parse_accepts_python_style_floats() {
        let text = "[*2,3*]\n0.0,1.0,2.0,3.0,4.0,5.0,6.0,\n\
                    0.1,0.2,0.4,0.6000000000000001,0.8,0.9,1.0,\n#####\n\n";
        let parsed = parse_str(text).unwrap();
        assert_eq!(parsed[0].0, SampleSizePair::new(2, 3));
        assert_eq!(parsed[0].1.len(), 7);
        assert!((parsed[0].1.w_cum()[3] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_parse_missing_sentinel() {
        let err = parse_str("[*1,1*]\n0.0,1.0,\n0.5,1.0,\n").unwrap_err();
        assert!(matches!(err, MannWhitneyError::Format { line: 1, .. }));

        let err = parse_str("[*1,1*]\n0.0,1.0,\n0.5,1.0,\n[*1,2*]\n").unwrap_err();
        assert!(matches!(err, MannWhitneyError::Format { line: 1, .. }));
    }

    #[test]
    fn test_parse_mismatched_lengths() {
        let err = parse_str("[*1,1*]\n0.0,1.0,\n1.0,\n#####\n").unwrap_err();
        assert!(matches!(err, MannWhitneyError::Format { line: 1, .. }));
    }

    #[test]
    fn test_parse_bad_number() {
        let err = parse_str("[*1,1*]\n0.0,one,\n0.5,1.0,\n#####\n").unwrap_err();
        match err {
            MannWhitneyError::Format { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("one"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_structural_errors() {
        assert!(parse_str("[*1;1*]\n").is_err());
        assert!(parse_str("#####\n").is_err());
        assert!(parse_str("0.0,\n").is_err());
        assert!(parse_str("[*1,1*]\n0.0,1.0,\n\n0.5,1.0,\n#####\n").is_err());
        assert!(parse_str("[*1,1*]\n0.0,1.0,\n0.5,1.0,\n0.5,1.0,\n#####\n").is_err());
        assert!(parse_str("[*1,1*]\n0.0,1.0,\n#####\n").is_err());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_str("").unwrap().is_empty());
    }
}
