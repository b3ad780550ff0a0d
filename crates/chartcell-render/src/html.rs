use crate::bootstrap::render_bootstrap;
use chartcell_core::{DisplayOptions, RenderFragment};

/// The chart container. Attribute values are escaped; the style is otherwise passed through.
pub fn render_container(fragment: &RenderFragment, style: &str) -> String {
    format!(
        r#"<div id="{}" style="{}"></div>"#,
        htmlize::escape_attribute(fragment.container_id()),
        htmlize::escape_attribute(style)
    )
}

/// Container followed by the bootstrap `<script>`, ready for a notebook output area.
///
/// Deterministic: the same fragment and options always produce the same bytes.
pub fn render_display_html(fragment: &RenderFragment, options: &DisplayOptions) -> String {
    let container = render_container(fragment, &options.style);
    let bootstrap = render_bootstrap(fragment, &options.loader);
    tracing::debug!(
        chart_id = fragment.container_id(),
        sources = fragment.external_scripts().len(),
        inline = fragment.inline_scripts().len(),
        "rendered notebook snippet"
    );
    format!("{container}<script>{bootstrap}</script>")
}
