//! Concrete chart sources: pre-rendered pages and ECharts option pages.

use crate::chart::{BaseConfiguration, Chart, ChartKind, generate_chart_id};
use crate::error::{BoxError, Result};
use crate::fragment::discover_container_id;
use serde_json::Value;
use std::io::Write;

pub const DEFAULT_ASSETS_HOST: &str = "https://go-echarts.github.io/go-echarts-assets/assets/";
pub const RUNTIME_BUNDLE: &str = "echarts.min.js";

/// A chart page that was rendered elsewhere (for instance an HTML file on disk).
#[derive(Debug, Clone)]
pub struct StaticPage {
    base: BaseConfiguration,
    html: String,
}

impl StaticPage {
    /// Wraps a page, taking the container id from its first `<div id>`.
    pub fn new(kind: ChartKind, html: impl Into<String>) -> Result<Self> {
        let html = html.into();
        let chart_id = discover_container_id(&html)?;
        Ok(Self {
            base: BaseConfiguration::for_kind(kind, chart_id),
            html,
        })
    }

    pub fn with_base(base: BaseConfiguration, html: impl Into<String>) -> Self {
        Self {
            base,
            html: html.into(),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl Chart for StaticPage {
    fn base(&self) -> &BaseConfiguration {
        &self.base
    }

    fn render_page(&self, out: &mut dyn Write) -> std::result::Result<(), BoxError> {
        out.write_all(self.html.as_bytes())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasRenderer {
    #[default]
    Canvas,
    Svg,
}

impl CanvasRenderer {
    pub fn as_str(self) -> &'static str {
        match self {
            CanvasRenderer::Canvas => "canvas",
            CanvasRenderer::Svg => "svg",
        }
    }
}

/// An ECharts option rendered through a go-echarts style standalone page.
#[derive(Debug, Clone)]
pub struct OptionChart {
    base: BaseConfiguration,
    option: Value,
    assets_host: String,
    theme: String,
    renderer: CanvasRenderer,
    page_title: String,
    extra_scripts: Vec<String>,
    initial_style: String,
}

impl OptionChart {
    pub fn new(kind: ChartKind, option: Value) -> Self {
        Self {
            base: BaseConfiguration::for_kind(kind, generate_chart_id()),
            option,
            assets_host: DEFAULT_ASSETS_HOST.to_string(),
            theme: "white".to_string(),
            renderer: CanvasRenderer::default(),
            page_title: "chartcell".to_string(),
            extra_scripts: Vec::new(),
            initial_style: "width:900px;height:500px;".to_string(),
        }
    }

    pub fn with_chart_id(mut self, chart_id: impl Into<String>) -> Self {
        self.base.chart_id = chart_id.into();
        self
    }

    /// Base URL the runtime and extension bundles are loaded from.
    pub fn with_assets_host(mut self, host: impl Into<String>) -> Self {
        self.assets_host = host.into();
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_renderer(mut self, renderer: CanvasRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = title.into();
        self
    }

    /// Adds a dependency (map data, theme script, ...) loaded after the runtime bundle.
    pub fn with_extra_script(mut self, src: impl Into<String>) -> Self {
        self.extra_scripts.push(src.into());
        self
    }

    pub fn option(&self) -> &Value {
        &self.option
    }

    fn asset_url(&self, name: &str) -> String {
        if self.assets_host.is_empty() || self.assets_host.ends_with('/') {
            format!("{}{name}", self.assets_host)
        } else {
            format!("{}/{name}", self.assets_host)
        }
    }

    /// Script sources in load order: runtime bundle, kind extensions, then extras.
    pub fn script_sources(&self) -> Vec<String> {
        let kind = self.base.chart_type.parse::<ChartKind>().ok();
        let mut out = vec![self.asset_url(RUNTIME_BUNDLE)];
        for asset in kind.map(ChartKind::extension_assets).unwrap_or_default() {
            out.push(self.asset_url(asset));
        }
        out.extend(self.extra_scripts.iter().cloned());
        out
    }
}

fn js_identifier_suffix(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// JSON embedded in a `<script>` must not close the element early.
fn script_safe_json(value: &Value) -> std::result::Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

impl Chart for OptionChart {
    fn base(&self) -> &BaseConfiguration {
        &self.base
    }

    fn render_page(&self, out: &mut dyn Write) -> std::result::Result<(), BoxError> {
        let id = &self.base.chart_id;
        let var = js_identifier_suffix(id);
        let id_attr = htmlize::escape_attribute(id.as_str());
        let id_js = serde_json::to_string(id)?;
        let theme_js = serde_json::to_string(&self.theme)?;
        let option_js = script_safe_json(&self.option)?;

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "    <meta charset=\"utf-8\">")?;
        writeln!(
            out,
            "    <title>{}</title>",
            htmlize::escape_text(self.page_title.as_str())
        )?;
        for src in self.script_sources() {
            writeln!(
                out,
                "    <script src=\"{}\"></script>",
                htmlize::escape_attribute(src.as_str())
            )?;
        }
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<div class=\"container\">")?;
        writeln!(
            out,
            "    <div class=\"item\" id=\"{id_attr}\" style=\"{}\"></div>",
            htmlize::escape_attribute(self.initial_style.as_str())
        )?;
        writeln!(out, "</div>")?;
        writeln!(out, "<script type=\"text/javascript\">")?;
        writeln!(out, "    \"use strict\";")?;
        writeln!(
            out,
            "    let goecharts_{var} = echarts.init(document.getElementById({id_js}), {theme_js}, {{ renderer: \"{}\" }});",
            self.renderer.as_str()
        )?;
        writeln!(out, "    let option_{var} = {option_js};")?;
        writeln!(out, "    goecharts_{var}.setOption(option_{var});")?;
        writeln!(out, "</script>")?;
        writeln!(out, "<style>")?;
        writeln!(
            out,
            "    .container {{margin-top:30px; display: flex;justify-content: center;align-items: center;}}"
        )?;
        writeln!(out, "    .item {{margin: auto;}}")?;
        writeln!(out, "</style>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }
}
