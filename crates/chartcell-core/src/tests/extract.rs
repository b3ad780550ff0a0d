use crate::*;

fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body>{body}</body></html>")
}

#[test]
fn single_source_and_inline_script_are_split() {
    let html = page(r#"<div id="c1"></div><script src="/a.js"></script><script>run();</script>"#);
    let fragment = extract_fragment(&html, None).unwrap();
    assert_eq!(fragment.container_id(), "c1");
    assert_eq!(fragment.external_scripts(), ["/a.js"]);
    assert_eq!(fragment.inline_scripts(), ["run();"]);
}

#[test]
fn split_does_not_depend_on_markup_order() {
    let html = page(r#"<script>run();</script><script src="/a.js"></script>"#);
    let fragment = extract_fragment(&html, Some("c1")).unwrap();
    assert_eq!(fragment.external_scripts(), ["/a.js"]);
    assert_eq!(fragment.inline_scripts(), ["run();"]);
}

#[test]
fn interleaved_scripts_keep_document_order_per_category() {
    let html = page(
        r#"<script src="/1.js"></script>
<script>one();</script>
<script src="/2.js"></script>
<script>two();</script>
<script>three();</script>
<script src="/3.js"></script>"#,
    );
    let fragment = extract_fragment(&html, Some("c")).unwrap();
    assert_eq!(fragment.external_scripts(), ["/1.js", "/2.js", "/3.js"]);
    assert_eq!(fragment.inline_scripts(), ["one();", "two();", "three();"]);
    assert_eq!(fragment.runtime_script(), "/1.js");
}

#[test]
fn duplicate_sources_are_kept() {
    let html = page(
        r#"<script src="/echarts.min.js"></script><script src="/echarts.min.js"></script><script>go()</script>"#,
    );
    let fragment = extract_fragment(&html, Some("c")).unwrap();
    assert_eq!(
        fragment.external_scripts(),
        ["/echarts.min.js", "/echarts.min.js"]
    );
}

#[test]
fn page_without_scripts_is_missing_assets() {
    let html = page(r#"<div id="c1"></div>"#);
    let err = extract_fragment(&html, None).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingAssets {
            external: 0,
            inline: 0
        }
    ));
}

#[test]
fn page_without_inline_code_is_missing_assets() {
    let html = page(r#"<script src="/a.js"></script><script>   </script>"#);
    let err = extract_fragment(&html, Some("c1")).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingAssets {
            external: 1,
            inline: 0
        }
    ));
}

#[test]
fn page_without_sources_is_missing_assets() {
    let html = page(r#"<script>run();</script>"#);
    assert!(matches!(
        extract_fragment(&html, Some("c1")),
        Err(Error::MissingAssets {
            external: 0,
            inline: 1
        })
    ));
}

#[test]
fn inline_text_of_sourced_script_is_ignored() {
    let html = page(r#"<script src="/a.js">ignored()</script><script>run();</script>"#);
    let fragment = extract_fragment(&html, Some("c")).unwrap();
    assert_eq!(fragment.external_scripts(), ["/a.js"]);
    assert_eq!(fragment.inline_scripts(), ["run();"]);
}

#[test]
fn inline_code_is_kept_verbatim() {
    let code = "\n  if (a < b && c > d) { draw('<div>'); }\n";
    let html = page(&format!(
        "<script>{code}</script><script src=\"/a.js\"></script>"
    ));
    let fragment = extract_fragment(&html, Some("c")).unwrap();
    assert_eq!(fragment.inline_scripts(), [code]);
}

#[test]
fn source_attribute_entities_are_decoded() {
    let html = page(r#"<script src="/lib.js?v=1&amp;min=1"></script><script>run()</script>"#);
    let fragment = extract_fragment(&html, Some("c")).unwrap();
    assert_eq!(fragment.external_scripts(), ["/lib.js?v=1&min=1"]);
}

#[test]
fn missing_container_id_is_reported() {
    let html = page(r#"<script src="/a.js"></script><script>run()</script>"#);
    assert!(matches!(
        extract_fragment(&html, None),
        Err(Error::MissingContainer)
    ));
}

#[test]
fn explicit_container_id_wins_over_document() {
    let html = page(r#"<div id="doc-id"></div><script src="/a.js"></script><script>x()</script>"#);
    let fragment = extract_fragment(&html, Some("given")).unwrap();
    assert_eq!(fragment.container_id(), "given");
    assert_eq!(discover_container_id(&html).unwrap(), "doc-id");
}

#[test]
fn fragment_constructor_enforces_non_empty_lists() {
    assert!(RenderFragment::new("c", vec![], vec!["x()".to_string()]).is_err());
    assert!(RenderFragment::new("c", vec!["/a.js".to_string()], vec![]).is_err());
    assert!(matches!(
        RenderFragment::new(" ", vec!["/a.js".to_string()], vec!["x()".to_string()]),
        Err(Error::MissingContainer)
    ));
}

#[test]
fn fragment_serializes_camel_case() {
    let fragment =
        RenderFragment::new("c", vec!["/a.js".to_string()], vec!["x()".to_string()]).unwrap();
    let value = serde_json::to_value(&fragment).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "containerId": "c",
            "externalScripts": ["/a.js"],
            "inlineScripts": ["x()"],
        })
    );
}
