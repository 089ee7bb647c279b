//! JSON output for one-shot commands
//!
//! One JSON object per line on stdout, UTF-8 only.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    write_line(&mut io::stdout(), &response)
}

/// Write one JSON value followed by a newline
fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_line_is_single_json_line() {
        let mut buffer: Vec<u8> = Vec::new();
        write_line(&mut buffer, &json!({"initialized": true})).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "{\"initialized\":true}\n");
    }
}
