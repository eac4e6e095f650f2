//! Delimited point-file support
//!
//! One point per line, exactly three numeric fields, with an optional header
//! line naming the three axes. Loading never aborts on bad content:
//! - a header without exactly three fields falls back to the default axis names
//! - a data line without exactly three numeric fields becomes the origin point
//!
//! Every recovery is recorded as a [`LoadDiagnostic`] and logged.

use scatterplot_core::{Error, Point3f, PointCloud, Result, SENTINEL_POINT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Axis names used when the file has no usable header
pub const DEFAULT_AXIS_NAMES: [&str; 3] = ["X-Axis", "Y-Axis", "Z-Axis"];

/// Owned copy of [`DEFAULT_AXIS_NAMES`]
pub fn default_axis_names() -> [String; 3] {
    DEFAULT_AXIS_NAMES.map(String::from)
}

/// Field separators understood by the reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    /// A single space; consecutive spaces produce empty fields
    #[default]
    Space,
    Comma,
    Tab,
    Semicolon,
    /// Any run of whitespace
    Whitespace,
    Other(char),
}

impl Delimiter {
    /// Character written between fields
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Space | Delimiter::Whitespace => ' ',
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
            Delimiter::Other(c) => *c,
        }
    }

    /// Split a line into fields
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Whitespace => line.split_whitespace().collect(),
            other => line.split(other.as_char()).collect(),
        }
    }
}

impl From<char> for Delimiter {
    fn from(c: char) -> Self {
        match c {
            ' ' => Delimiter::Space,
            ',' => Delimiter::Comma,
            '\t' => Delimiter::Tab,
            ';' => Delimiter::Semicolon,
            other => Delimiter::Other(other),
        }
    }
}

/// How a point file is laid out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointFileOptions {
    pub delimiter: Delimiter,
    pub has_header: bool,
}

impl PointFileOptions {
    pub fn new(delimiter: Delimiter, has_header: bool) -> Self {
        Self {
            delimiter,
            has_header,
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

impl Default for PointFileOptions {
    fn default() -> Self {
        Self::new(Delimiter::Space, false)
    }
}

/// What went wrong on a recovered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Header did not have three fields; default axis names were used
    MalformedHeader { fields: usize },
    /// Data line did not have three fields; the origin was recorded
    WrongFieldCount { fields: usize },
    /// A field was not a number; the origin was recorded
    InvalidNumber { field: usize },
}

/// A non-fatal problem found while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    /// 1-based line number in the source
    pub line: usize,
    pub kind: DiagnosticKind,
    pub text: String,
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MalformedHeader { fields } => write!(
                f,
                "line {}: header has {} fields, expected 3; using default axis names",
                self.line, fields
            ),
            DiagnosticKind::WrongFieldCount { fields } => write!(
                f,
                "line {}: entry has {} values, expected exactly 3; recorded as origin",
                self.line, fields
            ),
            DiagnosticKind::InvalidNumber { field } => write!(
                f,
                "line {}: value {} of {:?} is not a number; recorded as origin",
                self.line,
                field + 1,
                self.text
            ),
        }
    }
}

/// Result of loading a point file
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    pub cloud: PointCloud<Point3f>,
    pub axis_names: [String; 3],
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl PointTable {
    pub fn len(&self) -> usize {
        self.cloud.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloud.is_empty()
    }

    /// True when nothing had to be recovered
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Reader for delimited point files
pub struct PointFileReader;

impl PointFileReader {
    /// Read a point file from disk
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read<P: AsRef<Path>>(path: P, options: &PointFileOptions) -> Result<PointTable> {
        let file = File::open(path.as_ref())?;
        let table = Self::read_from(BufReader::new(file), options)?;
        info!(
            points = table.len(),
            diagnostics = table.diagnostics.len(),
            "loaded point file"
        );
        Ok(table)
    }

    /// Read points from any buffered source.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so such a line is
    /// recovered like any other malformed line.
    pub fn read_from<R: BufRead>(reader: R, options: &PointFileOptions) -> Result<PointTable> {
        let mut lines = reader
            .split(b'\n')
            .map(|raw| raw.map(decode_line))
            .enumerate();
        let mut diagnostics = Vec::new();
        let mut axis_names = default_axis_names();

        if options.has_header {
            if let Some((index, line)) = lines.next() {
                let line = line?;
                match Self::parse_header(&line, options.delimiter) {
                    Ok(names) => axis_names = names,
                    Err(kind) => {
                        let diagnostic = LoadDiagnostic {
                            line: index + 1,
                            kind,
                            text: line,
                        };
                        warn!("{}", diagnostic);
                        diagnostics.push(diagnostic);
                    }
                }
            }
        }

        let mut cloud = PointCloud::new();
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                debug!(line = index + 1, "skipping blank line");
                continue;
            }
            match Self::parse_line(&line, options.delimiter) {
                Ok(point) => cloud.push(point),
                Err(kind) => {
                    cloud.push(SENTINEL_POINT);
                    let diagnostic = LoadDiagnostic {
                        line: index + 1,
                        kind,
                        text: line,
                    };
                    warn!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
            }
        }

        Ok(PointTable {
            cloud,
            axis_names,
            diagnostics,
        })
    }

    /// Parse one data line into a point
    pub fn parse_line(
        line: &str,
        delimiter: Delimiter,
    ) -> std::result::Result<Point3f, DiagnosticKind> {
        let fields = delimiter.split(line.trim());
        if fields.len() != 3 {
            return Err(DiagnosticKind::WrongFieldCount {
                fields: fields.len(),
            });
        }

        let mut coords = [0.0f32; 3];
        for (field, (slot, raw)) in coords.iter_mut().zip(&fields).enumerate() {
            *slot = raw
                .trim()
                .parse::<f32>()
                .map_err(|_| DiagnosticKind::InvalidNumber { field })?;
        }
        Ok(Point3f::new(coords[0], coords[1], coords[2]))
    }

    fn parse_header(
        line: &str,
        delimiter: Delimiter,
    ) -> std::result::Result<[String; 3], DiagnosticKind> {
        let fields = delimiter.split(line.trim());
        match fields.as_slice() {
            [x, y, z] => Ok([x, y, z].map(|name| name.trim().to_string())),
            other => Err(DiagnosticKind::MalformedHeader {
                fields: other.len(),
            }),
        }
    }
}

fn decode_line(raw: Vec<u8>) -> String {
    let mut line = String::from_utf8_lossy(&raw).into_owned();
    if line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Writer producing files the reader accepts
pub struct PointFileWriter;

impl PointFileWriter {
    /// Write a point cloud to disk; a header is written when the options ask for one
    pub fn write<P: AsRef<Path>>(
        cloud: &PointCloud<Point3f>,
        path: P,
        options: &PointFileOptions,
        axis_names: Option<&[String; 3]>,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(&mut writer, cloud, options, axis_names)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(
        writer: &mut W,
        cloud: &PointCloud<Point3f>,
        options: &PointFileOptions,
        axis_names: Option<&[String; 3]>,
    ) -> Result<()> {
        let sep = options.delimiter.as_char();
        if options.has_header {
            let names = axis_names.cloned().unwrap_or_else(default_axis_names);
            if names.iter().any(|n| n.contains(sep)) {
                return Err(Error::InvalidData(format!(
                    "axis name contains the separator {:?}",
                    sep
                )));
            }
            writeln!(writer, "{}{sep}{}{sep}{}", names[0], names[1], names[2])?;
        }
        for p in cloud {
            writeln!(writer, "{}{sep}{}{sep}{}", p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
