//! Export selection and output files.
//!
//! One extraction converts one PDF and writes one file. The content is
//! rendered completely before the output is touched, and the write goes
//! through a temporary file in the destination directory that is renamed
//! over the target, so a failed run leaves any previous output intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::NamedTempFile;

use crate::convert::{ConversionResult, ConversionStatus, DocumentConverter};
use crate::error::{Error, Result};
use crate::ipc::extract_sections;
use crate::parser::ParseOptions;
use crate::render::{to_json, to_text, JsonFormat, RenderOptions, DICT_INDENT};

/// Input used when none is given.
pub const DEFAULT_INPUT: &str = "ipc.pdf";

/// Output representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Document mapping as indented JSON
    #[default]
    Dict,
    /// Full conversion result as JSON
    Json,
    Markdown,
    Text,
    /// IPC section records as a JSON array
    Sections,
}

impl ExportFormat {
    /// Output path used when none is given.
    pub fn default_output(self) -> &'static str {
        match self {
            ExportFormat::Dict | ExportFormat::Json => "ipc_data.json",
            ExportFormat::Markdown => "ipc.md",
            ExportFormat::Text => "ipc.txt",
            ExportFormat::Sections => "data/ipc_sections.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Dict => "dict",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Text => "text",
            ExportFormat::Sections => "sections",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Dict | ExportFormat::Json | ExportFormat::Sections => "application/json",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Text => "text/plain",
        }
    }

    fn default_json(self) -> JsonFormat {
        match self {
            ExportFormat::Json => JsonFormat::Compact,
            _ => JsonFormat::Indented(DICT_INDENT),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dict" => Ok(ExportFormat::Dict),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" => Ok(ExportFormat::Text),
            "sections" => Ok(ExportFormat::Sections),
            other => Err(Error::Other(format!("Unknown export format: {}", other))),
        }
    }
}

/// Options for a full extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub parse: ParseOptions,
    pub render: RenderOptions,
    /// JSON layout override; each format has its own default
    pub json: Option<JsonFormat>,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json = Some(format);
        self
    }
}

/// Rendered export content.
#[derive(Debug, Clone)]
pub struct Export {
    pub content: String,
    /// Number of records, for the sections format
    pub section_count: Option<usize>,
}

/// Render a conversion result in the requested format.
pub fn render_export(
    result: &ConversionResult,
    format: ExportFormat,
    options: &ExtractOptions,
) -> Result<Export> {
    let json = options.json.unwrap_or_else(|| format.default_json());
    let doc = &result.document;

    let (content, section_count) = match format {
        ExportFormat::Dict => (to_json(&doc.export_to_dict()?, json)?, None),
        ExportFormat::Json => (to_json(result, json)?, None),
        ExportFormat::Markdown => (doc.export_to_markdown_with(&options.render)?, None),
        ExportFormat::Text => (to_text(doc, &options.render)?, None),
        ExportFormat::Sections => {
            let sections = extract_sections(doc);
            (to_json(&sections, json)?, Some(sections.len()))
        }
    };

    Ok(Export {
        content,
        section_count,
    })
}

/// Write UTF-8 content to `path`, replacing any existing file. Missing
/// parent directories are created. Returns the number of bytes written.
pub fn write_output<P: AsRef<Path>>(path: P, content: &str) -> Result<u64> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    // Temporary files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    }

    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(content.len() as u64)
}

/// What an extraction run did.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ExportFormat,
    pub bytes_written: u64,
    pub page_count: u32,
    pub section_count: Option<usize>,
    pub status: ConversionStatus,
}

/// Convert `input` and write it to `output` in `format`.
pub fn extract<I, O>(input: I, output: O, format: ExportFormat) -> Result<ExtractionReport>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    extract_with_options(input, output, format, &ExtractOptions::default())
}

/// Convert `input` and write it to `output` in `format` with custom options.
pub fn extract_with_options<I, O>(
    input: I,
    output: O,
    format: ExportFormat,
    options: &ExtractOptions,
) -> Result<ExtractionReport>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());

    let converter = DocumentConverter::with_options(options.parse.clone());
    let result = converter.convert(input)?;
    let export = render_export(&result, format, options)?;
    let bytes_written = write_output(output, &export.content)?;

    log::info!(
        "Exported {} as {} to {} ({} bytes)",
        input.display(),
        format,
        output.display(),
        bytes_written
    );

    Ok(ExtractionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        format,
        bytes_written,
        page_count: result.input.page_count,
        section_count: export.section_count,
        status: result.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_and_defaults() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("DICT".parse::<ExportFormat>().unwrap(), ExportFormat::Dict);
        assert!("xml".parse::<ExportFormat>().is_err());

        assert_eq!(ExportFormat::default(), ExportFormat::Dict);
        assert_eq!(ExportFormat::Dict.default_output(), "ipc_data.json");
        assert_eq!(ExportFormat::Sections.default_output(), "data/ipc_sections.json");
        assert_eq!(ExportFormat::Markdown.mime_type(), "text/markdown");
    }

    #[test]
    fn test_write_output_creates_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("ipc_sections.json");

        write_output(&path, "[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");

        let written = write_output(&path, "[\"धारा\"]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\"धारा\"]");
        assert_eq!(written, "[\"धारा\"]".len() as u64);

        // No temporary files left behind.
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_extract_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ipc.pdf");
        let output = dir.path().join("ipc_data.json");

        let result = extract(&input, &output, ExportFormat::Dict);
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
        assert!(!output.exists());
    }
}
