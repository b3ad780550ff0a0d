//! Chart capability and the closed set of supported chart kinds.

use crate::error::{BoxError, Error, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

macro_rules! chart_kinds {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// The chart variants a page renderer may report.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ChartKind {
            $($variant),+
        }

        impl ChartKind {
            pub const ALL: &'static [ChartKind] = &[$(ChartKind::$variant),+];

            /// Canonical lower-camel name (`"bar3D"`, `"wordCloud"`, ...).
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ChartKind::$variant => $name),+
                }
            }
        }
    };
}

chart_kinds! {
    Bar => "bar",
    Bar3D => "bar3D",
    BoxPlot => "boxplot",
    Custom => "custom",
    EffectScatter => "effectScatter",
    Funnel => "funnel",
    Gauge => "gauge",
    Geo => "geo",
    Graph => "graph",
    HeatMap => "heatmap",
    Kline => "kline",
    Line3D => "line3D",
    Line => "line",
    Liquid => "liquidFill",
    Map => "map",
    Parallel => "parallel",
    Pie => "pie",
    Radar => "radar",
    Sankey => "sankey",
    Scatter3D => "scatter3D",
    Scatter => "scatter",
    Sunburst => "sunburst",
    Surface3D => "surface",
    ThemeRiver => "themeRiver",
    Tree => "tree",
    TreeMap => "treemap",
    WordCloud => "wordCloud",
}

impl ChartKind {
    /// Extension bundles this kind needs on top of the core runtime, in load order.
    pub fn extension_assets(self) -> &'static [&'static str] {
        match self {
            ChartKind::Bar3D | ChartKind::Line3D | ChartKind::Scatter3D | ChartKind::Surface3D => {
                &["echarts-gl.min.js"]
            }
            ChartKind::Liquid => &["echarts-liquidfill.min.js"],
            ChartKind::WordCloud => &["echarts-wordcloud.min.js"],
            _ => &[],
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn fold_kind_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for ChartKind {
    type Err = Error;

    /// Case-insensitive; `-`, `_` and spaces are ignored so `"word-cloud"` and `"WordCloud"`
    /// both resolve. Variant names (`"Liquid"`, `"Surface3D"`) are accepted as aliases.
    fn from_str(s: &str) -> Result<Self> {
        let folded = fold_kind_name(s);
        ChartKind::ALL
            .iter()
            .copied()
            .find(|kind| {
                fold_kind_name(kind.as_str()) == folded
                    || fold_kind_name(&format!("{kind:?}")) == folded
            })
            .ok_or_else(|| Error::UnsupportedType {
                kind: s.to_string(),
            })
    }
}

/// The structure every chart exposes regardless of its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseConfiguration {
    /// Element id the chart's container is anchored on.
    pub chart_id: String,
    /// Kind name as reported by the renderer.
    pub chart_type: String,
}

impl BaseConfiguration {
    pub fn new(chart_type: impl Into<String>, chart_id: impl Into<String>) -> Self {
        Self {
            chart_id: chart_id.into(),
            chart_type: chart_type.into(),
        }
    }

    pub fn for_kind(kind: ChartKind, chart_id: impl Into<String>) -> Self {
        Self::new(kind.as_str(), chart_id)
    }
}

/// Anything that can render itself to a complete standalone HTML page.
///
/// The page must list the chart's runtime bundle `<script src>` before the inline scripts that
/// configure the chart.
pub trait Chart {
    fn base(&self) -> &BaseConfiguration;

    fn render_page(&self, out: &mut dyn Write) -> std::result::Result<(), BoxError>;
}

impl<C: Chart + ?Sized> Chart for &C {
    fn base(&self) -> &BaseConfiguration {
        (**self).base()
    }

    fn render_page(&self, out: &mut dyn Write) -> std::result::Result<(), BoxError> {
        (**self).render_page(out)
    }
}

impl<C: Chart + ?Sized> Chart for Box<C> {
    fn base(&self) -> &BaseConfiguration {
        (**self).base()
    }

    fn render_page(&self, out: &mut dyn Write) -> std::result::Result<(), BoxError> {
        (**self).render_page(out)
    }
}

/// Resolves the chart's reported kind against the supported set.
pub fn normalize<C: Chart + ?Sized>(chart: &C) -> Result<(ChartKind, &BaseConfiguration)> {
    let base = chart.base();
    let kind = base.chart_type.parse::<ChartKind>()?;
    Ok((kind, base))
}

/// Generates a fresh container id usable both as an HTML id and inside JS identifiers.
pub fn generate_chart_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("c{}", &raw[..20])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip_through_from_str() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), *kind);
        }
        assert_eq!(ChartKind::ALL.len(), 27);
    }

    #[test]
    fn kind_parsing_is_lenient_about_case_and_separators() {
        assert_eq!("Bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!(
            "word-cloud".parse::<ChartKind>().unwrap(),
            ChartKind::WordCloud
        );
        assert_eq!("heat_map".parse::<ChartKind>().unwrap(), ChartKind::HeatMap);
        assert_eq!("Liquid".parse::<ChartKind>().unwrap(), ChartKind::Liquid);
        assert_eq!(
            "Surface3D".parse::<ChartKind>().unwrap(),
            ChartKind::Surface3D
        );
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let err = "candlestick-3d".parse::<ChartKind>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { ref kind } if kind == "candlestick-3d"));
    }

    #[test]
    fn generated_ids_are_identifier_safe() {
        let id = generate_chart_id();
        assert_eq!(id.len(), 21);
        assert!(id.starts_with('c'));
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, generate_chart_id());
    }
}
