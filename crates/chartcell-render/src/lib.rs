#![forbid(unsafe_code)]

//! Notebook snippet synthesis for extracted chart fragments.
//!
//! The output is one container `<div>` immediately followed by one `<script>` that loads the
//! chart's script sources (through RequireJS when the front-end has it, through plain script
//! tags otherwise) and then runs the chart's inline code.

pub mod bootstrap;
pub mod html;
pub mod plan;

pub use bootstrap::{js_string_literal, render_bootstrap, strip_js_extension};
pub use html::{render_container, render_display_html};
pub use plan::{LoadPlan, LoadRequest, PageState, RunReport};
