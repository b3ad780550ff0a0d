//! Script fragment extraction from a rendered chart page.

use crate::chart::{Chart, normalize};
use crate::error::{Error, Result};
use lol_html::{RewriteStrSettings, element, rewrite_str, text};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// The pieces of a chart page that are needed to redraw the chart elsewhere.
///
/// Both script lists keep document order: later script sources may depend on earlier ones, and
/// the first source is expected to be the chart runtime bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFragment {
    container_id: String,
    external_scripts: Vec<String>,
    inline_scripts: Vec<String>,
}

impl RenderFragment {
    /// Builds a fragment, rejecting empty script lists and then an empty container id.
    pub fn new(
        container_id: impl Into<String>,
        external_scripts: Vec<String>,
        inline_scripts: Vec<String>,
    ) -> Result<Self> {
        if external_scripts.is_empty() || inline_scripts.is_empty() {
            return Err(Error::MissingAssets {
                external: external_scripts.len(),
                inline: inline_scripts.len(),
            });
        }
        let container_id = container_id.into();
        if container_id.trim().is_empty() {
            return Err(Error::MissingContainer);
        }
        Ok(Self {
            container_id,
            external_scripts,
            inline_scripts,
        })
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn external_scripts(&self) -> &[String] {
        &self.external_scripts
    }

    pub fn inline_scripts(&self) -> &[String] {
        &self.inline_scripts
    }

    /// The script expected to carry the chart runtime.
    pub fn runtime_script(&self) -> &str {
        &self.external_scripts[0]
    }
}

#[derive(Debug)]
enum ScriptEntry {
    Source(String),
    Inline(String),
}

#[derive(Debug, Default)]
struct ScanState {
    scripts: Vec<ScriptEntry>,
    first_div_id: Option<String>,
}

struct ScannedPage {
    external_scripts: Vec<String>,
    inline_scripts: Vec<String>,
    first_div_id: Option<String>,
}

fn scan_page(html: &str) -> Result<ScannedPage> {
    let state = Rc::new(RefCell::new(ScanState::default()));

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("script", {
                    let state = Rc::clone(&state);
                    move |el| {
                        // `lol_html` hands out raw attribute values.
                        let entry = match el.get_attribute("src") {
                            Some(src) => ScriptEntry::Source(
                                htmlize::unescape_attribute(src.as_str()).into_owned(),
                            ),
                            None => ScriptEntry::Inline(String::new()),
                        };
                        state.borrow_mut().scripts.push(entry);
                        Ok(())
                    }
                }),
                text!("script", {
                    let state = Rc::clone(&state);
                    move |t| {
                        let mut state = state.borrow_mut();
                        if let Some(ScriptEntry::Inline(body)) = state.scripts.last_mut() {
                            body.push_str(t.as_str());
                        }
                        Ok(())
                    }
                }),
                element!("div[id]", {
                    let state = Rc::clone(&state);
                    move |el| {
                        let mut state = state.borrow_mut();
                        if state.first_div_id.is_none()
                            && let Some(id) = el.get_attribute("id")
                            && !id.trim().is_empty()
                        {
                            state.first_div_id =
                                Some(htmlize::unescape_attribute(id.as_str()).into_owned());
                        }
                        Ok(())
                    }
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|err| Error::ParseFailure {
        message: err.to_string(),
    })?;

    let state = Rc::try_unwrap(state)
        .map(RefCell::into_inner)
        .map_err(|_| Error::ParseFailure {
            message: "HTML scanner state is still shared after rewriting".to_string(),
        })?;

    let mut external_scripts = Vec::new();
    let mut inline_scripts = Vec::new();
    for entry in state.scripts {
        match entry {
            ScriptEntry::Source(src) => external_scripts.push(src),
            ScriptEntry::Inline(body) if !body.trim().is_empty() => inline_scripts.push(body),
            ScriptEntry::Inline(_) => {}
        }
    }

    Ok(ScannedPage {
        external_scripts,
        inline_scripts,
        first_div_id: state.first_div_id,
    })
}

/// Splits the `<script>` elements of a standalone chart page into script sources and inline
/// bodies.
///
/// When `container_id` is `None` the id of the first `<div>` carrying one is used.
pub fn extract_fragment(html: &str, container_id: Option<&str>) -> Result<RenderFragment> {
    let scanned = scan_page(html)?;
    tracing::debug!(
        external = scanned.external_scripts.len(),
        inline = scanned.inline_scripts.len(),
        "scanned chart page scripts"
    );

    let container_id = match container_id {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => scanned.first_div_id.unwrap_or_default(),
    };

    RenderFragment::new(
        container_id,
        scanned.external_scripts,
        scanned.inline_scripts,
    )
}

/// Renders a chart to a page and extracts its fragment.
pub fn parse_rendering<C: Chart + ?Sized>(chart: &C) -> Result<RenderFragment> {
    let (kind, base) = normalize(chart)?;
    tracing::debug!(kind = %kind, chart_id = %base.chart_id, "rendering chart page");

    let mut buf = Vec::new();
    chart
        .render_page(&mut buf)
        .map_err(|source| Error::RenderFailure {
            chart_id: base.chart_id.clone(),
            source,
        })?;

    let html = String::from_utf8(buf).map_err(|err| Error::ParseFailure {
        message: format!("rendered page is not UTF-8: {err}"),
    })?;

    extract_fragment(&html, Some(&base.chart_id))
}

/// Finds the container id a page would be extracted with (first `<div id>`).
pub fn discover_container_id(html: &str) -> Result<String> {
    scan_page(html)?.first_div_id.ok_or(Error::MissingContainer)
}
