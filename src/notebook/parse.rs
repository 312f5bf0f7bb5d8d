//! Notebook parsing - `.ipynb` bytes to the canonical cell sequence.
//!
//! Parsing fails softly: the caller treats any [`ParseError`] as "no change
//! this cycle" and logs it, so a half-written or malformed file on disk never
//! tears down the watch loop.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::{
    Cell, CellKind, FALLBACK_LANGUAGE, MARKUP_LANGUAGE, Output, OutputItem, OutputKind,
};

/// Parse failures, all non-fatal to the reload loop
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid notebook json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("notebook has no cell list")]
    MissingCells,
}

// =============================================================================
// Raw on-disk shapes
// =============================================================================

/// Source text as stored on disk: a single string or a fragment list.
/// Fragments already carry their own line terminators.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Fragments {
    Single(String),
    Many(Vec<String>),
}

impl Fragments {
    fn join(self) -> String {
        match self {
            Self::Single(text) => text,
            Self::Many(parts) => parts.concat(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Option<Vec<RawCell>>,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    kernelspec: Option<RawKernelspec>,
}

#[derive(Debug, Deserialize)]
struct RawKernelspec {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: String,
    #[serde(default)]
    source: Option<Fragments>,
    #[serde(default)]
    execution_count: Option<i64>,
    #[serde(default)]
    outputs: Vec<RawOutput>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    #[serde(default)]
    output_type: String,
    #[serde(default)]
    text: Option<Fragments>,
    #[serde(default)]
    data: serde_json::Map<String, Value>,
    #[serde(default)]
    ename: Option<String>,
    #[serde(default)]
    evalue: Option<String>,
    #[serde(default)]
    traceback: Vec<String>,
}

// =============================================================================
// Conversion
// =============================================================================

/// Parse raw notebook bytes into the canonical cell sequence.
pub fn parse_notebook(bytes: &[u8]) -> Result<Vec<Cell>, ParseError> {
    let raw: RawNotebook = serde_json::from_slice(bytes)?;
    let Some(raw_cells) = raw.cells else {
        return Err(ParseError::MissingCells);
    };

    let language = raw
        .metadata
        .kernelspec
        .and_then(|kernelspec| kernelspec.language)
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());

    Ok(raw_cells
        .into_iter()
        .map(|cell| convert_cell(cell, &language))
        .collect())
}

fn convert_cell(raw: RawCell, kernel_language: &str) -> Cell {
    let kind = if raw.cell_type == "code" {
        CellKind::Code
    } else {
        CellKind::Markup
    };

    let language = match kind {
        CellKind::Code => kernel_language.to_string(),
        CellKind::Markup => MARKUP_LANGUAGE.to_string(),
    };

    Cell {
        kind,
        source: raw.source.map(Fragments::join).unwrap_or_default(),
        language,
        // Negative counts are treated the same as null: never executed.
        execution_order: raw.execution_count.and_then(|n| u32::try_from(n).ok()),
        outputs: raw.outputs.into_iter().filter_map(convert_output).collect(),
    }
}

/// Convert one raw output record. Records that yield zero items are dropped
/// entirely rather than kept as empty placeholders.
fn convert_output(raw: RawOutput) -> Option<Output> {
    let RawOutput {
        output_type,
        text,
        data,
        ename,
        evalue,
        traceback,
    } = raw;

    let (kind, items) = match output_type.as_str() {
        "stream" => (
            OutputKind::Stream,
            vec![OutputItem::Text {
                mime: "text/plain".to_string(),
                text: text.map(Fragments::join).unwrap_or_default(),
            }],
        ),
        "execute_result" => (OutputKind::Result, data_items(data)),
        "display_data" => (OutputKind::DisplayData, data_items(data)),
        "error" => {
            let message = format!(
                "{}: {}\n{}",
                ename.unwrap_or_default(),
                evalue.unwrap_or_default(),
                traceback.join("\n")
            );
            (
                OutputKind::Error,
                vec![OutputItem::Text {
                    mime: "text/plain".to_string(),
                    text: message,
                }],
            )
        }
        _ => return None,
    };

    if items.is_empty() {
        None
    } else {
        Some(Output { kind, items })
    }
}

fn data_items(data: serde_json::Map<String, Value>) -> Vec<OutputItem> {
    data.into_iter()
        .map(|(mime, value)| convert_data_entry(mime, value))
        .collect()
}

fn convert_data_entry(mime: String, value: Value) -> OutputItem {
    let text = match value {
        Value::String(text) => text,
        Value::Array(parts) => parts
            .into_iter()
            .map(|part| match part {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
        other => other.to_string(),
    };

    if mime.starts_with("image/") {
        // Serialized image payloads wrap base64 across lines; strip the
        // whitespace before decoding.
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if let Ok(data) = BASE64.decode(compact.as_bytes()) {
            return OutputItem::Binary { mime, data };
        }
        // Undecodable payloads fall through and stay visible as text.
    }

    OutputItem::Text { mime, text }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Vec<Cell> {
        parse_notebook(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_code_cell_with_string_source() {
        let cells = parse(json!({
            "cells": [
                {"cell_type": "code", "source": "print(1)\n", "execution_count": 2}
            ],
            "metadata": {"kernelspec": {"language": "python"}}
        }));

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].kind, CellKind::Code);
        assert_eq!(cells[0].source, "print(1)\n");
        assert_eq!(cells[0].language, "python");
        assert_eq!(cells[0].execution_order, Some(2));
        assert!(cells[0].outputs.is_empty());
    }

    #[test]
    fn test_source_fragments_joined_without_separator() {
        let cells = parse(json!({
            "cells": [
                {"cell_type": "code", "source": ["a = 1\n", "b = 2\n", "a + b"]}
            ]
        }));

        assert_eq!(cells[0].source, "a = 1\nb = 2\na + b");
    }

    #[test]
    fn test_missing_source_is_empty() {
        let cells = parse(json!({"cells": [{"cell_type": "code"}]}));
        assert_eq!(cells[0].source, "");
    }

    #[test]
    fn test_markup_cell_language_is_fixed() {
        let cells = parse(json!({
            "cells": [{"cell_type": "markdown", "source": "# Title"}],
            "metadata": {"kernelspec": {"language": "julia"}}
        }));

        assert_eq!(cells[0].kind, CellKind::Markup);
        assert_eq!(cells[0].language, "markdown");
    }

    #[test]
    fn test_unknown_cell_type_maps_to_markup() {
        let cells = parse(json!({"cells": [{"cell_type": "raw", "source": "x"}]}));
        assert_eq!(cells[0].kind, CellKind::Markup);
    }

    #[test]
    fn test_kernel_language_default() {
        let cells = parse(json!({"cells": [{"cell_type": "code", "source": "1"}]}));
        assert_eq!(cells[0].language, "python");
    }

    #[test]
    fn test_null_execution_count() {
        let cells = parse(json!({
            "cells": [{"cell_type": "code", "source": "1", "execution_count": null}]
        }));
        assert_eq!(cells[0].execution_order, None);
    }

    #[test]
    fn test_negative_execution_count_dropped() {
        let cells = parse(json!({
            "cells": [{"cell_type": "code", "source": "1", "execution_count": -1}]
        }));
        assert_eq!(cells[0].execution_order, None);
    }

    #[test]
    fn test_stream_output_fragments_joined() {
        let cells = parse(json!({
            "cells": [{
                "cell_type": "code",
                "source": "print('hi')",
                "outputs": [
                    {"output_type": "stream", "name": "stdout", "text": ["line1\n", "line2\n"]}
                ]
            }]
        }));

        let output = &cells[0].outputs[0];
        assert_eq!(output.kind, OutputKind::Stream);
        assert_eq!(
            output.items,
            vec![OutputItem::Text {
                mime: "text/plain".to_string(),
                text: "line1\nline2\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_image_output_decodes_base64() {
        // "aGVsbG8=" is the base64 encoding of "hello"
        let cells = parse(json!({
            "cells": [{
                "cell_type": "code",
                "source": "plot()",
                "outputs": [
                    {"output_type": "display_data", "data": {"image/png": "aGVs\nbG8="}}
                ]
            }]
        }));

        let output = &cells[0].outputs[0];
        assert_eq!(output.kind, OutputKind::DisplayData);
        assert_eq!(
            output.items,
            vec![OutputItem::Binary {
                mime: "image/png".to_string(),
                data: b"hello".to_vec(),
            }]
        );
    }

    #[test]
    fn test_undecodable_image_kept_as_text() {
        let cells = parse(json!({
            "cells": [{
                "cell_type": "code",
                "source": "plot()",
                "outputs": [
                    {"output_type": "display_data", "data": {"image/png": "not base64!!!"}}
                ]
            }]
        }));

        assert!(matches!(
            &cells[0].outputs[0].items[0],
            OutputItem::Text { mime, .. } if mime == "image/png"
        ));
    }

    #[test]
    fn test_execute_result_text_kept_as_is() {
        let cells = parse(json!({
            "cells": [{
                "cell_type": "code",
                "source": "1 + 1",
                "outputs": [
                    {"output_type": "execute_result", "data": {"text/plain": ["2"]}}
                ]
            }]
        }));

        let output = &cells[0].outputs[0];
        assert_eq!(output.kind, OutputKind::Result);
        assert_eq!(
            output.items,
            vec![OutputItem::Text {
                mime: "text/plain".to_string(),
                text: "2".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_string_data_serialized_compactly() {
        let cells = parse(json!({
            "cells": [{
                "cell_type": "code",
                "source": "x",
                "outputs": [
                    {"output_type": "execute_result", "data": {"application/json": {"a": 1}}}
                ]
            }]
        }));

        assert_eq!(
            cells[0].outputs[0].items,
            vec![OutputItem::Text {
                mime: "application/json".to_string(),
                text: "{\"a\":1}".to_string(),
            }]
        );
    }

    #[test]
    fn test_error_output_message_synthesis() {
        let cells = parse(json!({
            "cells": [{
                "cell_type": "code",
                "source": "raise",
                "outputs": [{
                    "output_type": "error",
                    "ename": "ValueError",
                    "evalue": "bad",
                    "traceback": ["line1", "line2"]
                }]
            }]
        }));

        let output = &cells[0].outputs[0];
        assert_eq!(output.kind, OutputKind::Error);
        assert_eq!(
            output.items,
            vec![OutputItem::Text {
                mime: "text/plain".to_string(),
                text: "ValueError: bad\nline1\nline2".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_and_unknown_outputs_dropped() {
        let cells = parse(json!({
            "cells": [{
                "cell_type": "code",
                "source": "x",
                "outputs": [
                    {"output_type": "display_data", "data": {}},
                    {"output_type": "update_display_data", "data": {"text/plain": "y"}},
                    {"output_type": "stream", "text": "kept"}
                ]
            }]
        }));

        // Only the stream record survives; the empty display_data and the
        // unknown output_type yield zero items and disappear.
        assert_eq!(cells[0].outputs.len(), 1);
        assert_eq!(cells[0].outputs[0].kind, OutputKind::Stream);
    }

    #[test]
    fn test_invalid_json_fails_softly() {
        assert!(matches!(
            parse_notebook(b"{not json"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_missing_cells_fails_softly() {
        assert!(matches!(
            parse_notebook(br#"{"metadata": {}}"#),
            Err(ParseError::MissingCells)
        ));
    }

    #[test]
    fn test_non_sequence_cells_fails_softly() {
        assert!(parse_notebook(br#"{"cells": "nope"}"#).is_err());
    }
}
