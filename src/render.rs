use std::fmt::Write as _;
use std::str::FromStr;

use crate::emoji_index::Report;
use crate::{AppError, Result};

pub const REPORT_TITLE: &str = "Emoji Index";

/// How a report is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(AppError::InvalidFormat(other.to_string())),
        }
    }
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(report)),
        OutputFormat::Html => render_html(report),
        OutputFormat::Json => render_json(report),
    }
}

// Names and custom emoji end up in table cells.
fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('*', "\\*")
        .replace('_', "\\_")
        .replace('<', "&lt;")
}

fn glyph_cell(glyphs: &[String]) -> String {
    glyphs
        .iter()
        .map(|g| escape_cell(g))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A favorites table followed by one table per user.
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", REPORT_TITLE);

    if report.is_empty() {
        out.push_str("No emoji found.\n");
        return out;
    }

    out.push_str("## Favorites\n\n");
    out.push_str("| User | Emoji | Count |\n");
    out.push_str("|---|---|---:|\n");
    for favorite in &report.favorites {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            escape_cell(&favorite.user_name),
            glyph_cell(&favorite.glyphs),
            favorite.count
        );
    }

    for user in &report.per_user {
        let _ = writeln!(out, "\n## {}\n", escape_cell(&user.user_name));
        out.push_str("| Count | Emoji |\n");
        out.push_str("|---:|---|\n");
        for group in user.groups.iter().rev() {
            let _ = writeln!(out, "| {} | {} |", group.count, glyph_cell(&group.glyphs));
        }
    }

    out
}

pub fn render_html(report: &Report) -> Result<String> {
    let body = markdown::to_html_with_options(&render_markdown(report), &markdown::Options::gfm())
        .map_err(|e| AppError::MarkdownConvert(e.to_string()))?;

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        REPORT_TITLE, body
    ))
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| AppError::JsonSerialize(e.to_string()))
}
