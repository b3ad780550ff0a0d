pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by a chart's own page renderer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported chart type: {kind}")]
    UnsupportedType { kind: String },

    #[error("Failed to render chart `{chart_id}` to a page: {source}")]
    RenderFailure {
        chart_id: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to parse rendered HTML: {message}")]
    ParseFailure { message: String },

    #[error(
        "Rendered HTML does not contain the expected chart assets ({external} script sources, {inline} inline scripts); the chart renderer output has an unexpected shape"
    )]
    MissingAssets { external: usize, inline: usize },

    #[error("Rendered HTML does not name a chart container element")]
    MissingContainer,

    #[error("Invalid display options: {message}")]
    InvalidOptions { message: String },
}
