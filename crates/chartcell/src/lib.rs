#![forbid(unsafe_code)]

//! `chartcell` displays server-rendered ECharts pages inside notebook cells.
//!
//! A chart that writes itself out as a standalone HTML page is reduced to its container id,
//! script sources and inline configuration code, then re-assembled into a snippet that can be
//! injected into a live cell output without reloading the page. The snippet loads the chart
//! runtime through RequireJS when the front-end provides it and through plain script tags
//! otherwise, and it can be executed repeatedly in the same page.
//!
//! Two equivalent entry points:
//! - [`display`] renders and sends the snippet to evcxr (stdout);
//! - [`display_content`] returns the snippet for callers composing their own layout.

pub mod display;

pub use chartcell_core::*;
pub use display::{DisplaySurface, EvcxrSurface, NotebookHtml, write_evcxr_content};

pub mod render {
    pub use chartcell_render::*;
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error(transparent)]
    Chart(#[from] chartcell_core::Error),
    #[error("Failed to deliver chart to the notebook: {0}")]
    Surface(#[from] std::io::Error),
}

pub type DisplayResult<T> = std::result::Result<T, DisplayError>;

/// Renders the chart and returns the notebook snippet (container `<div>` + `<script>`).
///
/// `options.style` is applied to the container `<div>`; typically it sets `width` and `height`,
/// e.g. `"width: 1024px; height:600px; background: white;"`.
pub fn display_content<C: Chart + ?Sized>(
    chart: &C,
    options: &DisplayOptions,
) -> chartcell_core::Result<String> {
    options.validate()?;
    let fragment = parse_rendering(chart)?;
    Ok(chartcell_render::render_display_html(&fragment, options))
}

/// Like [`display_content`], wrapped so evcxr shows it when returned from a cell.
pub fn notebook_html<C: Chart + ?Sized>(
    chart: &C,
    options: &DisplayOptions,
) -> chartcell_core::Result<NotebookHtml> {
    display_content(chart, options).map(NotebookHtml::new)
}

/// Renders the chart and sends it to `surface`.
pub fn display_to<C, S>(chart: &C, options: &DisplayOptions, surface: &mut S) -> DisplayResult<()>
where
    C: Chart + ?Sized,
    S: DisplaySurface + ?Sized,
{
    let html = display_content(chart, options)?;
    surface.display_html(&html)?;
    Ok(())
}

/// Renders the chart and displays it in the running evcxr notebook.
pub fn display<C: Chart + ?Sized>(chart: &C, options: &DisplayOptions) -> DisplayResult<()> {
    display_to(chart, options, &mut EvcxrSurface::stdout())
}

/// [`display`] with default options and the given container style.
pub fn display_with_style<C: Chart + ?Sized>(chart: &C, style: &str) -> DisplayResult<()> {
    display(chart, &DisplayOptions::with_style(style))
}
