//! OCR collaborator interface and input normalisation.
//!
//! Recognition itself happens outside this crate. An engine hands back one of
//! the [`OcrInput`] shapes, and the parser only ever sees [`RawLine`]s.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::receipt::rules::patterns::LINE_BREAK;

/// Boxes whose vertical centres are closer than this share a line.
const LINE_TOLERANCE: f32 = 15.0;

/// An external text recognizer.
pub trait OcrEngine {
    /// Recognize the text in an encoded image.
    fn recognize(&self, image: &[u8]) -> Result<OcrInput>;
}

/// One line of OCR text with its position on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    /// Text as recognized, untrimmed.
    pub text: String,
    /// Zero-based line index.
    pub index: usize,
}

impl RawLine {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }

    /// Trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// A recognized text token with its quadrilateral position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    #[serde(default)]
    pub confidence: f32,
}

impl TextBox {
    /// Box from an axis-aligned rectangle.
    pub fn from_rect(x1: f32, y1: f32, x2: f32, y2: f32, text: impl Into<String>) -> Self {
        Self {
            bbox: [x1, y1, x2, y1, x2, y2, x1, y2],
            text: text.into(),
            confidence: 1.0,
        }
    }

    /// Get the center point of the bounding box.
    pub fn center(&self) -> (f32, f32) {
        let x = (self.bbox[0] + self.bbox[2] + self.bbox[4] + self.bbox[6]) / 4.0;
        let y = (self.bbox[1] + self.bbox[3] + self.bbox[5] + self.bbox[7]) / 4.0;
        (x, y)
    }
}

/// Text as delivered by an OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrInput {
    /// Full recognized text with embedded line breaks.
    Text(String),
    /// Lines already split, in reading order.
    Lines(Vec<String>),
    /// Positioned tokens in arbitrary order.
    Boxes(Vec<TextBox>),
}

impl OcrInput {
    /// Normalise into ordered, indexed lines.
    pub fn into_lines(self) -> Vec<RawLine> {
        let lines = match self {
            OcrInput::Text(text) => split_lines(&text),
            OcrInput::Lines(lines) => lines,
            OcrInput::Boxes(boxes) => group_boxes(boxes),
        };

        lines
            .into_iter()
            .enumerate()
            .map(|(index, text)| RawLine::new(index, text))
            .collect()
    }

    /// True when there is no visible character anywhere in the input.
    pub fn is_blank(&self) -> bool {
        match self {
            OcrInput::Text(text) => text.trim().is_empty(),
            OcrInput::Lines(lines) => lines.iter().all(|l| l.trim().is_empty()),
            OcrInput::Boxes(boxes) => boxes.iter().all(|b| b.text.trim().is_empty()),
        }
    }
}

impl From<String> for OcrInput {
    fn from(text: String) -> Self {
        OcrInput::Text(text)
    }
}

impl From<&str> for OcrInput {
    fn from(text: &str) -> Self {
        OcrInput::Text(text.to_string())
    }
}

impl From<Vec<String>> for OcrInput {
    fn from(lines: Vec<String>) -> Self {
        OcrInput::Lines(lines)
    }
}

impl From<&[&str]> for OcrInput {
    fn from(lines: &[&str]) -> Self {
        OcrInput::Lines(lines.iter().map(|l| l.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OcrInput {
    fn from(lines: [&str; N]) -> Self {
        OcrInput::Lines(lines.iter().map(|l| l.to_string()).collect())
    }
}

impl From<Vec<TextBox>> for OcrInput {
    fn from(boxes: Vec<TextBox>) -> Self {
        OcrInput::Boxes(boxes)
    }
}

/// Split on every line-break form. A trailing break does not start another line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = LINE_BREAK.split(text).map(str::to_string).collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Group boxes into lines top-to-bottom, joining each line's tokens left-to-right.
fn group_boxes(mut boxes: Vec<TextBox>) -> Vec<String> {
    boxes.sort_by(|a, b| {
        let (_, ay) = a.center();
        let (_, by) = b.center();
        ay.partial_cmp(&by).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rows: Vec<(f32, Vec<TextBox>)> = Vec::new();
    for text_box in boxes {
        let (_, y) = text_box.center();
        match rows.last_mut() {
            Some((row_y, row)) if (y - *row_y).abs() < LINE_TOLERANCE => row.push(text_box),
            _ => rows.push((y, vec![text_box])),
        }
    }

    rows.into_iter()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| {
                let (ax, _) = a.center();
                let (bx, _) = b.center();
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            });
            row.iter()
                .map(|b| b.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
