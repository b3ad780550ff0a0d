#![forbid(unsafe_code)]

//! Chart page model and script fragment extraction (headless).
//!
//! A chart that can write itself out as a standalone HTML page is reduced to a
//! [`RenderFragment`]: the container id, the ordered `<script src>` dependencies and the ordered
//! inline configuration scripts. `chartcell-render` turns that fragment into a notebook snippet.

pub mod chart;
pub mod config;
pub mod error;
pub mod fragment;
pub mod page;

pub use chart::{BaseConfiguration, Chart, ChartKind, generate_chart_id, normalize};
pub use config::{DisplayOptions, LoaderConfig};
pub use error::{BoxError, Error, Result};
pub use fragment::{RenderFragment, discover_container_id, extract_fragment, parse_rendering};
pub use page::{CanvasRenderer, OptionChart, StaticPage};

#[cfg(test)]
mod tests;
