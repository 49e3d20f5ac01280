//! Error types for the analytics engine.

/// Errors that can occur while aggregating risk events.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// A mean-based metric or report was requested over zero events.
    #[error("no risk events to analyze")]
    EmptyInput,

    /// A sum or count left the representable range.
    #[error("numeric overflow while computing {context}")]
    Overflow {
        /// Which quantity overflowed.
        context: &'static str,
    },

    /// The chart page template failed to render.
    #[error("chart render error: {0}")]
    Render(#[from] minijinja::Error),
}
