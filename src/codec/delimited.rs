use crate::codec::CodecError;
use crate::error::RowTableError;
use crate::table::row::Row;
use crate::table::table::Table;
use crate::table::value::Value;
use csv::ReaderBuilder;
use csv::Terminator;
use csv::WriterBuilder;
use log::debug;
use std::path::Path;

/// Delimited-text presets.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Format {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl Format {
    /// Field separator byte for the preset.
    pub const fn delimiter(&self) -> u8 {
        match self {
            Format::Csv => b',',
            Format::Tsv => b'\t',
        }
    }
}

/// Options controlling how delimited text becomes a table.
#[derive(Copy, Clone, Debug)]
pub struct DecodeOptions {
    /// Field separator byte
    pub delimiter: u8,
    /// Treat the first record as field names; otherwise names are
    /// synthesized positionally as `c0`, `c1`, ...
    pub has_headers: bool,
    /// Coerce fields numerically (integer, else float, else string;
    /// empty fields become `Null`)
    pub infer_types: bool,
}

impl DecodeOptions {
    /// Default options for a preset: headers on, inference on.
    pub fn for_format(format: Format) -> Self {
        DecodeOptions {
            delimiter: format.delimiter(),
            has_headers: true,
            infer_types: true,
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::for_format(Format::Csv)
    }
}

/// Encodes a table as delimited text: one record per row in header order,
/// records joined by the row separator (the trailing one is trimmed),
/// optionally preceded by a header record.
pub fn encode(
    table: &Table,
    delimiter: u8,
    row_separator: u8,
    with_headers: bool,
) -> Result<String, CodecError> {
    let headers = table.headers();
    if headers.is_empty() {
        return Ok(String::new());
    }
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(Terminator::Any(row_separator))
            .from_writer(&mut buffer);
        if with_headers {
            writer.write_record(&headers)?;
        }
        for row in table.rows() {
            let record: Vec<String> = headers
                .iter()
                .map(|name| row.get(name).map(Value::to_string).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    let mut text = String::from_utf8(buffer)?;
    if text.ends_with(row_separator as char) {
        text.pop();
    }
    Ok(text)
}

/// Decodes delimited text into a table, one row per record in file order.
///
/// With headers on, the first record becomes the schema for all following
/// records; header-only text yields a rowless table that still reports its
/// headers, and empty text yields an empty schema-less table. Records whose
/// width disagrees with the first record are an error.
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Table, CodecError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(false)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let headers: Vec<String> = if options.has_headers {
        match records.next() {
            Some(record) => record?.iter().map(str::to_owned).collect(),
            None => return Ok(Table::new()),
        }
    } else {
        Vec::new()
    };

    let mut table = if options.has_headers {
        Table::with_schema(headers.clone())
    } else {
        Table::new()
    };
    for record in records {
        let record = record?;
        let row: Row = record
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let name = headers
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| format!("c{}", index));
                let value = if options.infer_types {
                    Value::infer(field)
                } else {
                    Value::String(field.to_owned())
                };
                (name, value)
            })
            .collect();
        table.push(row);
    }
    debug!(
        "decoded {} rows with {} columns",
        table.len(),
        table.headers().len()
    );
    Ok(table)
}

impl Table {
    /// Encodes the table as CSV with a header line.
    pub fn to_csv(&self) -> Result<String, RowTableError> {
        Ok(encode(self, Format::Csv.delimiter(), b'\n', true)?)
    }

    /// Encodes the table as TSV with a header line.
    pub fn to_tsv(&self) -> Result<String, RowTableError> {
        Ok(encode(self, Format::Tsv.delimiter(), b'\n', true)?)
    }

    /// Decodes a CSV string with a header line and type inference.
    pub fn from_csv(text: &str) -> Result<Table, RowTableError> {
        Ok(decode(text, &DecodeOptions::for_format(Format::Csv))?)
    }

    /// Decodes a TSV string with a header line and type inference.
    pub fn from_tsv(text: &str) -> Result<Table, RowTableError> {
        Ok(decode(text, &DecodeOptions::for_format(Format::Tsv))?)
    }

    /// Writes the table to a file in the given format.
    pub fn save(&self, path: impl AsRef<Path>, format: Format) -> Result<(), RowTableError> {
        let text = encode(self, format.delimiter(), b'\n', true)?;
        std::fs::write(path.as_ref(), text)?;
        debug!("saved {} rows to {}", self.len(), path.as_ref().display());
        Ok(())
    }

    /// Writes the table to a CSV file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<(), RowTableError> {
        self.save(path, Format::Csv)
    }

    /// Writes the table to a TSV file.
    pub fn save_tsv(&self, path: impl AsRef<Path>) -> Result<(), RowTableError> {
        self.save(path, Format::Tsv)
    }

    /// Reads a table from a file in the given format.
    pub fn load(path: impl AsRef<Path>, format: Format) -> Result<Table, RowTableError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!("loading table from {}", path.as_ref().display());
        Ok(decode(&text, &DecodeOptions::for_format(format))?)
    }

    /// Reads a table from a CSV file.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Table, RowTableError> {
        Self::load(path, Format::Csv)
    }

    /// Reads a table from a TSV file.
    pub fn load_tsv(path: impl AsRef<Path>) -> Result<Table, RowTableError> {
        Self::load(path, Format::Tsv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        vec![
            [
                ("a", Value::Integer(1)),
                ("b", Value::String("x".to_owned())),
            ]
            .into_iter()
            .collect(),
            [
                ("a", Value::Integer(2)),
                ("b", Value::String("y".to_owned())),
            ]
            .into_iter()
            .collect(),
        ]
        .into()
    }

    #[test]
    fn encode_csv_with_headers() {
        let text = encode(&sample(), b',', b'\n', true).unwrap();
        assert_eq!(text, "a,b\n1,x\n2,y");
    }

    #[test]
    fn encode_without_headers() {
        let text = encode(&sample(), b',', b'\n', false).unwrap();
        assert_eq!(text, "1,x\n2,y");
    }

    #[test]
    fn encode_with_custom_row_separator() {
        let text = encode(&sample(), b';', b'|', true).unwrap();
        assert_eq!(text, "a;b|1;x|2;y");
    }

    #[test]
    fn encode_empty_table() {
        assert_eq!(encode(&Table::new(), b',', b'\n', true).unwrap(), "");
    }

    #[test]
    fn decode_with_inference_round_trips() {
        let decoded = Table::from_csv("a,b\n1,x\n2,y").unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn decode_numeric_and_null_fields() {
        let decoded = Table::from_csv("n,f,s\n1,2.5,\n-3,2.0,text").unwrap();
        assert_eq!(
            decoded.row(0).unwrap().values().cloned().collect::<Vec<_>>(),
            vec![Value::Integer(1), Value::Float(2.5), Value::Null]
        );
        assert_eq!(
            decoded.row(1).unwrap().values().cloned().collect::<Vec<_>>(),
            vec![
                Value::Integer(-3),
                Value::Float(2.0),
                Value::String("text".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_without_inference_keeps_strings() {
        let options = DecodeOptions {
            infer_types: false,
            ..DecodeOptions::default()
        };
        let decoded = decode("a\n1", &options).unwrap();
        assert_eq!(
            decoded.row(0).unwrap().get("a"),
            Some(&Value::String("1".to_owned()))
        );
    }

    #[test]
    fn decode_without_headers_synthesizes_names() {
        let options = DecodeOptions {
            has_headers: false,
            ..DecodeOptions::default()
        };
        let decoded = decode("1,x\n2,y", &options).unwrap();
        assert_eq!(decoded.headers(), ["c0", "c1"]);
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn decode_header_only_text_keeps_schema() {
        let decoded = Table::from_csv("a,b").unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.headers(), ["a", "b"]);
    }

    #[test]
    fn decode_empty_text() {
        let decoded = Table::from_csv("").unwrap();
        assert!(decoded.is_empty());
        assert!(decoded.headers().is_empty());
    }

    #[test]
    fn decode_rejects_ragged_records() {
        assert!(Table::from_csv("a,b\n1").is_err());
    }

    #[test]
    fn quoted_fields_round_trip() {
        let table: Table = vec![[
            ("a", Value::String("x,y".to_owned())),
            ("b", Value::String("line\nbreak".to_owned())),
        ]
        .into_iter()
        .collect::<Row>()]
        .into();
        let text = table.to_csv().unwrap();
        assert_eq!(text, "a,b\n\"x,y\",\"line\nbreak\"");
        let decoded = Table::from_csv(&text).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn tsv_round_trip() {
        let text = sample().to_tsv().unwrap();
        assert_eq!(text, "a\tb\n1\tx\n2\ty");
        assert_eq!(Table::from_tsv(&text).unwrap(), sample());
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir().join("rowtable_codec_save_and_load.csv");
        sample().save_csv(&path).unwrap();
        let loaded = Table::load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, sample());
    }
}
