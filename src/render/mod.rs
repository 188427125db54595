//! Rendering module for converting thesis documents to HTML and JSON.

mod citation;
mod escape;
mod html;
mod image;
mod json;
mod options;
mod result;
mod style;

pub use citation::{citation_markers, link_citations, link_citations_counted};
pub use escape::{escape_attr, escape_html, strip_tags};
pub use html::{
    load_error_panel, render_failure, render_location, to_html, to_html_with_stats, HtmlRenderer,
};
pub use image::{is_local_reference, is_missing, ImageResolver};
pub use json::{to_json, JsonFormat};
pub use options::{
    ImagePolicy, RenderOptions, DEFAULT_PLACEHOLDER_HOST, DEFAULT_STYLESHEET, MISSING_FILE_REF,
};
pub use result::{RenderResult, RenderStats, Rendered};
pub use style::{theme_declarations, StyleSheet};
