//! Answer emission in the selected output format.

use bn_common::{Error, OutputFormat};
use std::io::Write;

use crate::query::Answer;

/// Write `answers` to `out`.
pub fn write_answers<W: Write>(
    out: &mut W,
    answers: &[Answer],
    format: OutputFormat,
) -> Result<(), Error> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, answers)?;
            writeln!(out)?;
        }
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut *out, answers)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for a in answers {
                if a.is_undefined() {
                    writeln!(out, "{}\tundefined", a.index)?;
                } else {
                    writeln!(out, "{}\t{}", a.index, a.answer)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Vec<Answer> {
        vec![
            Answer {
                index: 1,
                answer: 0.24,
            },
            Answer {
                index: 2,
                answer: f64::NAN,
            },
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_answers(&mut buf, &answers(), format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn json_is_one_line() {
        assert_eq!(
            render(OutputFormat::Json),
            "[{\"index\":1,\"answer\":0.24},{\"index\":2,\"answer\":null}]\n"
        );
    }

    #[test]
    fn pretty_parses_back() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Pretty)).unwrap();
        assert_eq!(value[0]["index"], 1);
        assert!(value[1]["answer"].is_null());
    }

    #[test]
    fn text_marks_undefined() {
        assert_eq!(render(OutputFormat::Text), "1\t0.24\n2\tundefined\n");
    }
}
