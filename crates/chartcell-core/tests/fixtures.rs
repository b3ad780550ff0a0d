use chartcell_core::{ChartKind, Error, StaticPage, extract_fragment, parse_rendering};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn read_page(name: &str) -> String {
    let path = workspace_root().join("fixtures").join("pages").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()))
}

#[test]
fn go_echarts_bar_page_extracts() {
    let html = read_page("bar.html");
    let fragment = extract_fragment(&html, None).unwrap();
    assert_eq!(fragment.container_id(), "vYbEiFpWZWqi");
    assert_eq!(
        fragment.external_scripts(),
        ["https://go-echarts.github.io/go-echarts-assets/assets/echarts.min.js"]
    );
    assert_eq!(fragment.inline_scripts().len(), 1);
    let code = &fragment.inline_scripts()[0];
    assert!(code.contains("echarts.init(document.getElementById('vYbEiFpWZWqi')"));
    assert!(code.contains("goecharts_vYbEiFpWZWqi.setOption(option_vYbEiFpWZWqi);"));
}

#[test]
fn go_echarts_extension_page_keeps_runtime_first() {
    let page = StaticPage::new(ChartKind::WordCloud, read_page("wordcloud.html")).unwrap();
    let fragment = parse_rendering(&page).unwrap();
    assert_eq!(fragment.container_id(), "KqVaNuTorzSf");
    assert_eq!(
        fragment.external_scripts(),
        [
            "https://go-echarts.github.io/go-echarts-assets/assets/echarts.min.js",
            "https://go-echarts.github.io/go-echarts-assets/assets/echarts-wordcloud.min.js",
        ]
    );
    assert_eq!(fragment.inline_scripts().len(), 2);
    assert!(fragment.inline_scripts()[0].contains("setOption"));
    assert!(fragment.inline_scripts()[1].contains("resize"));
}

#[test]
fn page_without_scripts_is_rejected() {
    let page = StaticPage::new(ChartKind::Bar, read_page("no-scripts.html")).unwrap();
    assert!(matches!(
        parse_rendering(&page),
        Err(Error::MissingAssets {
            external: 0,
            inline: 0
        })
    ));
}
