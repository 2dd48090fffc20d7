//! `^GF` graphic fields in ASCII hex, with ZPL run-length compression.
//!
//! Compression characters, applied per row of `row_bytes * 2` hex digits:
//!
//! ```text
//! G..Y   repeat the next hex digit 1..19 times
//! g..z   repeat the next hex digit 20..400 times (counts add up: "hB" = 21)
//! ,      fill the rest of the row with 0
//! !      fill the rest of the row with F
//! :      repeat the previous row
//! ```

use super::elements::ElementKind;
use super::ParseError;

/// Upper bound on the decoded size; a 4x6in label at 24 dpmm is ~2 MB.
const MAX_FIELD_BYTES: usize = 16 * 1024 * 1024;

/// Decode the parameters of a `^GF` command (`A,b,c,d,data`).
pub fn parse_graphic_field(params: &str) -> Result<ElementKind, ParseError> {
    let mut parts = params.splitn(5, ',');
    let format = parts.next().unwrap_or("").trim();
    let total_bytes = field_number(parts.next(), "total bytes")?;
    let _field_count = parts.next();
    let row_bytes = field_number(parts.next(), "bytes per row")?;
    let data = parts.next().unwrap_or("");

    if !format.is_empty() && !format.eq_ignore_ascii_case("A") {
        return Err(ParseError::GraphicField(format!(
            "unsupported format '{format}', only ASCII hex (A) is supported"
        )));
    }
    let marker = data.trim_start().get(..5).unwrap_or("").to_ascii_uppercase();
    if marker == ":Z64:" || marker == ":B64:" {
        return Err(ParseError::GraphicField(
            "base64 encoded data is not supported".to_string(),
        ));
    }
    if row_bytes == 0 || total_bytes == 0 {
        return Err(ParseError::GraphicField(
            "byte counts must be positive".to_string(),
        ));
    }
    if total_bytes > MAX_FIELD_BYTES {
        return Err(ParseError::GraphicField(format!(
            "{total_bytes} bytes exceeds the supported size"
        )));
    }
    if row_bytes > total_bytes {
        return Err(ParseError::GraphicField(format!(
            "{row_bytes} bytes per row exceeds the {total_bytes} byte total"
        )));
    }

    let rows = total_bytes.div_ceil(row_bytes);
    let data = decode_ascii_hex(data, row_bytes, rows)?;

    Ok(ElementKind::GraphicField {
        row_bytes: row_bytes as u32,
        rows: rows as u32,
        data,
    })
}

fn field_number(value: Option<&str>, what: &str) -> Result<usize, ParseError> {
    let value = value.unwrap_or("").trim();
    value
        .parse()
        .map_err(|_| ParseError::GraphicField(format!("invalid {what} '{value}'")))
}

/// Expand compressed ASCII hex into `rows` packed rows of `row_bytes`.
pub(crate) fn decode_ascii_hex(
    data: &str,
    row_bytes: usize,
    rows: usize,
) -> Result<Vec<u8>, ParseError> {
    let mut rows_out = RowWriter {
        row_nibbles: row_bytes * 2,
        total: row_bytes * rows,
        out: Vec::with_capacity(row_bytes * rows),
        row: Vec::with_capacity(row_bytes * 2),
        previous: Vec::new(),
    };
    let mut repeat = 0usize;

    for ch in data.chars() {
        if rows_out.is_full() {
            break;
        }
        match ch {
            'G'..='Y' => repeat += (ch as usize - 'G' as usize) + 1,
            'g'..='z' => repeat += ((ch as usize - 'g' as usize) + 1) * 20,
            ',' => rows_out.finish_row(0),
            '!' => rows_out.finish_row(0xF),
            ':' => {
                if !rows_out.row.is_empty() {
                    return Err(ParseError::GraphicField(
                        "row repeat in the middle of a row".to_string(),
                    ));
                }
                rows_out.row = rows_out.previous.clone();
                rows_out.finish_row(0);
            }
            c if c.is_ascii_hexdigit() => {
                let nibble = c.to_digit(16).unwrap_or(0) as u8;
                for _ in 0..repeat.max(1) {
                    rows_out.push(nibble);
                }
                repeat = 0;
            }
            c if c.is_whitespace() => {}
            other => {
                return Err(ParseError::GraphicField(format!(
                    "unexpected character '{other}' in data"
                )))
            }
        }
    }
    if !rows_out.row.is_empty() {
        rows_out.finish_row(0);
    }

    let mut out = rows_out.out;
    out.resize(row_bytes * rows, 0);
    Ok(out)
}

struct RowWriter {
    row_nibbles: usize,
    total: usize,
    out: Vec<u8>,
    row: Vec<u8>,
    previous: Vec<u8>,
}

impl RowWriter {
    fn is_full(&self) -> bool {
        self.out.len() >= self.total
    }

    fn push(&mut self, nibble: u8) {
        self.row.push(nibble);
        if self.row.len() == self.row_nibbles {
            self.finish_row(0);
        }
    }

    /// Pad the current row with `fill` and pack it into bytes.
    fn finish_row(&mut self, fill: u8) {
        self.row.resize(self.row_nibbles, fill);
        self.out
            .extend(self.row.chunks(2).map(|pair| (pair[0] << 4) | pair[1]));
        self.previous = std::mem::take(&mut self.row);
    }
}
