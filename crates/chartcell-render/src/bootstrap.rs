//! The browser-side bootstrap: load the chart's script sources, then run its inline code.
//!
//! The loader is picked when the script runs, not when it is generated:
//! - with a RequireJS-style `requirejs` global, the first source (the chart runtime) is
//!   registered as a named module and its export bound to a global; the remaining sources go
//!   through `require` afterwards;
//! - otherwise every source is injected as a `<script async=false>` into `document.head`.
//!
//! Sources already present as `<script src>` in the page are treated as loaded, so re-running a
//! cell (or showing several charts that share a runtime) does not request them again. The inline
//! code runs once per bootstrap execution after every source is ready. Load errors are logged to
//! the console and leave the chart undrawn.

use chartcell_core::{LoaderConfig, RenderFragment};

/// JSON string literal that is also safe inside a `<script>` element.
pub fn js_string_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string())
        .to_string()
        .replace("</", "<\\/")
}

const LOAD_SCRIPTS_FN: &str = r#"  function scriptTagFor(src) {
    for (const script of document.getElementsByTagName("script")) {
      if (script.getAttribute("src") === src) {
        return script;
      }
    }
    return null;
  }

  function loadScriptsThenExecute(scripts, fn) {
    if (scripts.length === 0) {
      fn();
      return;
    }

    let pending = scripts.length;
    let done = false;
    const scriptLoaded = () => {
      pending--;
      if (pending === 0 && !done) {
        done = true;
        fn();
      }
    };
    const loadFailed = (src, err) => console.error("Failed to load script: " + src, err);

    for (const src of scripts) {
      const existing = scriptTagFor(src);
      if (existing !== null) {
        if (existing.dataset.chartcellLoaded === "false") {
          existing.addEventListener("load", scriptLoaded);
        } else {
          scriptLoaded();
        }
      } else if (typeof requirejs === "function") {
        require([src], () => scriptLoaded(), (err) => loadFailed(src, err));
      } else {
        const script = document.createElement("script");
        script.async = false;
        script.src = src;
        script.dataset.chartcellLoaded = "false";
        script.onload = () => {
          script.dataset.chartcellLoaded = "true";
          scriptLoaded();
        };
        script.onerror = (err) => loadFailed(src, err);
        document.head.appendChild(script);
      }
    }
  }
"#;

/// Renders the bootstrap IIFE (without the surrounding `<script>` tags).
pub fn render_bootstrap(fragment: &RenderFragment, loader: &LoaderConfig) -> String {
    let mut out = String::with_capacity(
        LOAD_SCRIPTS_FN.len()
            + 1024
            + fragment
                .inline_scripts()
                .iter()
                .map(|s| s.len() + 1)
                .sum::<usize>(),
    );

    out.push_str("(() => {\n");

    out.push_str("  const chartFn = function() {\n");
    for code in fragment.inline_scripts() {
        out.push_str(code);
        out.push('\n');
    }
    out.push_str("  };\n\n");

    out.push_str("  const chartSrcs = [\n");
    for src in fragment.external_scripts() {
        out.push_str("    ");
        out.push_str(&js_string_literal(src));
        out.push_str(",\n");
    }
    out.push_str("  ];\n\n");

    out.push_str(LOAD_SCRIPTS_FN);
    out.push('\n');

    let module_js = js_string_literal(&loader.module_name);
    let global_js = js_string_literal(&loader.global_name);
    out.push_str("  if (typeof requirejs === \"function\") {\n");
    out.push_str("    console.log(\"Using RequireJS\");\n");
    out.push_str("    const runtimeSrc = chartSrcs.shift();\n");
    out.push_str("    const cut = runtimeSrc.lastIndexOf(\".js\");\n");
    out.push_str("    const runtimePath = cut >= 0 ? runtimeSrc.substring(0, cut) : runtimeSrc;\n");
    out.push_str(&format!(
        "    requirejs.config({{ paths: {{ [{module_js}]: runtimePath }} }});\n"
    ));
    out.push_str(&format!("    require([{module_js}], (runtime) => {{\n"));
    out.push_str(&format!("      window[{global_js}] = runtime;\n"));
    out.push_str("      loadScriptsThenExecute(chartSrcs, chartFn);\n");
    out.push_str(
        "    }, (err) => console.error(\"Failed to load script: \" + runtimeSrc, err));\n",
    );
    out.push_str("  } else {\n");
    out.push_str("    console.log(\"Not using RequireJS\");\n");
    out.push_str("    loadScriptsThenExecute(chartSrcs, chartFn);\n");
    out.push_str("  }\n");
    out.push_str("})();\n");

    tracing::trace!(
        chart_id = fragment.container_id(),
        bytes = out.len(),
        "rendered chart bootstrap"
    );
    out
}

/// Mirrors the runtime's `substring(0, lastIndexOf(".js"))` path stripping.
pub fn strip_js_extension(src: &str) -> &str {
    match src.rfind(".js") {
        Some(cut) => &src[..cut],
        None => src,
    }
}
