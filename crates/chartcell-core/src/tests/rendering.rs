use crate::*;
use std::io::Write;

struct FailingChart {
    base: BaseConfiguration,
}

impl Chart for FailingChart {
    fn base(&self) -> &BaseConfiguration {
        &self.base
    }

    fn render_page(&self, _out: &mut dyn Write) -> std::result::Result<(), BoxError> {
        Err("template exploded".into())
    }
}

struct BinaryChart {
    base: BaseConfiguration,
}

impl Chart for BinaryChart {
    fn base(&self) -> &BaseConfiguration {
        &self.base
    }

    fn render_page(&self, out: &mut dyn Write) -> std::result::Result<(), BoxError> {
        out.write_all(&[0x3c, 0xff, 0xfe, 0x3e])?;
        Ok(())
    }
}

const PAGE: &str = r#"<html><head><script src="/echarts.min.js"></script></head>
<body><div id="from-doc"></div><script>echarts.init()</script></body></html>"#;

#[test]
fn render_failure_carries_chart_id_and_source() {
    let chart = FailingChart {
        base: BaseConfiguration::for_kind(ChartKind::Gauge, "g1"),
    };
    let err = parse_rendering(&chart).unwrap_err();
    assert!(matches!(err, Error::RenderFailure { ref chart_id, .. } if chart_id == "g1"));
    assert!(err.to_string().contains("template exploded"));
}

#[test]
fn non_utf8_page_is_a_parse_failure() {
    let chart = BinaryChart {
        base: BaseConfiguration::for_kind(ChartKind::Pie, "p1"),
    };
    assert!(matches!(
        parse_rendering(&chart),
        Err(Error::ParseFailure { .. })
    ));
}

#[test]
fn unsupported_kind_is_rejected_before_rendering() {
    let chart = FailingChart {
        base: BaseConfiguration::new("candlestick3d", "x"),
    };
    assert!(matches!(
        parse_rendering(&chart),
        Err(Error::UnsupportedType { ref kind }) if kind == "candlestick3d"
    ));
}

#[test]
fn every_supported_kind_shares_one_extraction_path() {
    for kind in ChartKind::ALL {
        let page = StaticPage::with_base(BaseConfiguration::for_kind(*kind, "shared"), PAGE);
        let fragment = parse_rendering(&page).unwrap();
        assert_eq!(fragment.container_id(), "shared");
        assert_eq!(fragment.external_scripts(), ["/echarts.min.js"]);
        assert_eq!(fragment.inline_scripts(), ["echarts.init()"]);
    }
}

#[test]
fn boxed_and_borrowed_charts_render() {
    let boxed: Box<dyn Chart> = Box::new(StaticPage::new(ChartKind::Radar, PAGE).unwrap());
    let fragment = parse_rendering(&boxed).unwrap();
    assert_eq!(fragment.container_id(), "from-doc");

    let page = StaticPage::new(ChartKind::Radar, PAGE).unwrap();
    let by_ref = &page;
    assert_eq!(parse_rendering(&by_ref).unwrap(), fragment);
}
