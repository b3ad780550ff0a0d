//! Delivery of rendered snippets to a notebook front-end.
//!
//! evcxr picks up rich output written to stdout between `EVCXR_BEGIN_CONTENT <mime>` and
//! `EVCXR_END_CONTENT` markers; see
//! <https://github.com/evcxr/evcxr/blob/main/evcxr_jupyter/README.md#custom-output>.

use std::io::{self, Write};

pub const HTML_MIME: &str = "text/html";

/// Something that can show an HTML snippet in a live document.
pub trait DisplaySurface {
    fn display_html(&mut self, html: &str) -> io::Result<()>;
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for &mut S {
    fn display_html(&mut self, html: &str) -> io::Result<()> {
        (**self).display_html(html)
    }
}

/// evcxr's custom-output protocol over any writer (stdout by default).
#[derive(Debug)]
pub struct EvcxrSurface<W> {
    out: W,
}

impl EvcxrSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> EvcxrSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Writes one evcxr content block.
pub fn write_evcxr_content(out: &mut dyn Write, mime: &str, content: &str) -> io::Result<()> {
    writeln!(out, "EVCXR_BEGIN_CONTENT {mime}")?;
    writeln!(out, "{content}")?;
    writeln!(out, "EVCXR_END_CONTENT")?;
    out.flush()
}

impl<W: Write> DisplaySurface for EvcxrSurface<W> {
    fn display_html(&mut self, html: &str) -> io::Result<()> {
        write_evcxr_content(&mut self.out, HTML_MIME, html)
    }
}

/// A rendered snippet that evcxr displays when it is the value of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookHtml {
    html: String,
}

impl NotebookHtml {
    pub fn new(html: String) -> Self {
        Self { html }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    pub fn evcxr_display(&self) {
        if let Err(err) = EvcxrSurface::stdout().display_html(&self.html) {
            tracing::warn!(error = %err, "failed to write evcxr content");
        }
    }
}

impl std::fmt::Display for NotebookHtml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.html)
    }
}
