//! HTML rendering for thesis documents.

use crate::error::{Error, Result};
use crate::load::Loader;
use crate::model::{
    AbstractBlock, Bibliography, ContentItem, ContentSection, Credit, ImageItem, Meta, Section,
    ThesisDocument,
};

use super::citation::link_citations_counted;
use super::escape::{escape_attr, escape_html, strip_tags};
use super::image::{is_missing, ImageResolver};
use super::style::{theme_declarations, StyleSheet};
use super::{RenderOptions, RenderResult, RenderStats, Rendered};

/// Shown in place of all content when the document cannot be loaded.
const LOAD_ERROR_PANEL: &str = r#"<div class="load-error" style="color:red; text-align:center; padding:20px;">
<strong>Error loading thesis data.</strong><br>
<em>Note: If you are opening index.html directly from your hard drive, browsers often block 'fetch' due to CORS security. Please run a local server (e.g., VS Code Live Server).</em>
</div>
"#;

/// The fixed error panel markup.
pub fn load_error_panel() -> &'static str {
    LOAD_ERROR_PANEL
}

/// Convert a document to HTML.
pub fn to_html(doc: &ThesisDocument, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &ThesisDocument, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// Page for a failed load: the container holds only the error panel.
pub fn render_failure(error: &Error, options: &RenderOptions) -> String {
    log::warn!("Rendering load error panel: {}", error);
    let renderer = HtmlRenderer::new(options.clone());
    renderer.wrap(LOAD_ERROR_PANEL, None, "", "Error loading thesis data")
}

/// Load the document at `location` and render it.
///
/// This is the whole pipeline: one fetch, then either the rendered
/// document or the error page. Nothing is retried.
///
/// Only load failures produce the error page. Invalid options are
/// rejected with `Err` before anything is fetched.
pub fn render_location(
    loader: &Loader,
    location: &str,
    options: &RenderOptions,
) -> Result<Rendered> {
    options.validate()?;

    match loader.load(location) {
        Ok(doc) => Ok(Rendered::Document(to_html_with_stats(&doc, options)?)),
        Err(error) => Ok(Rendered::Failed {
            content: render_failure(&error, options),
            error,
        }),
    }
}

/// HTML renderer.
///
/// One renderer renders one document; the style sheet and the image
/// counter live for exactly that pass.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
    styles: StyleSheet,
    images: ImageResolver,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        let images = ImageResolver::new(options.image_policy.clone());
        Self {
            options,
            stats: RenderStats::new(),
            styles: StyleSheet::new(),
            images,
        }
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &ThesisDocument) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(mut self, doc: &ThesisDocument) -> Result<RenderResult> {
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, doc.meta.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &ThesisDocument) -> Result<String> {
        self.options.validate()?;

        if let Some(global) = doc.global_styles() {
            self.styles.push_rules(global);
        }

        let mut body = String::new();
        self.render_header(&mut body, &doc.meta);
        for section in &doc.content {
            self.render_section(&mut body, section);
        }
        self.stats.style_rule_count = self.styles.rule_count() as u32;

        let theme = doc.theme().map(theme_declarations).unwrap_or_default();
        let title = self
            .options
            .page_title
            .clone()
            .unwrap_or_else(|| strip_tags(&doc.meta.title));
        let style_element = self.styles.to_style_element();

        Ok(self.wrap(&body, Some(&style_element), &theme, &title))
    }

    /// Put container content into a page (or a bare fragment).
    fn wrap(&self, body: &str, style_element: Option<&str>, theme: &str, title: &str) -> String {
        let style_element = style_element.unwrap_or_default();
        let mut out = String::with_capacity(body.len() + 512);

        if self.options.fragment {
            out.push_str(style_element);
            if theme.is_empty() {
                out.push_str("<div id=\"app\">\n");
            } else {
                out.push_str(&format!("<div id=\"app\" style=\"{}\">\n", theme));
            }
            out.push_str(body);
            out.push_str("</div>\n");
            return out;
        }

        out.push_str("<!DOCTYPE html>\n");
        if theme.is_empty() {
            out.push_str("<html lang=\"en\">\n");
        } else {
            out.push_str(&format!("<html lang=\"en\" style=\"{}\">\n", theme));
        }
        out.push_str("<head>\n<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        if let Some(ref href) = self.options.stylesheet_href {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                escape_attr(href)
            ));
        }
        out.push_str(style_element);
        out.push_str("</head>\n<body>\n<div id=\"app\">\n");
        out.push_str(body);
        out.push_str("</div>\n</body>\n</html>\n");
        out
    }

    /// Text inserted as markup: trusted unless escaping is on.
    fn fragment(&self, text: &str) -> String {
        if self.options.escape_text {
            escape_html(text)
        } else {
            text.to_string()
        }
    }

    /// Markup text with citation markers linked.
    fn cited(&mut self, text: &str) -> String {
        let (linked, added) = link_citations_counted(&self.fragment(text));
        self.stats.citation_count += added as u32;
        linked
    }

    fn render_header(&self, out: &mut String, meta: &Meta) {
        let authors = self.render_credits(&meta.authors);
        let fields = self.render_credits(&meta.fields);
        let author_label = if meta.authors.len() > 1 { "Authors" } else { "Author" };
        let field_label = if meta.fields.len() > 1 { "Fields" } else { "Field" };

        out.push_str("<div class=\"doc-header\">\n");
        out.push_str(&format!(
            "<h1 class=\"doc-title\">{}</h1>\n",
            self.fragment(&meta.title)
        ));
        out.push_str("<div class=\"meta-data\">\n");
        out.push_str(&format!(
            "<div><strong>{}:</strong> {}</div>\n",
            author_label, authors
        ));
        out.push_str(&format!("<div><strong>Date:</strong> {}</div>\n", self.fragment(&meta.date)));
        out.push_str(&format!(
            "<div><strong>{}:</strong> {}</div>\n",
            field_label, fields
        ));
        out.push_str("</div>\n</div>\n");
    }

    fn render_credits(&self, credits: &[Credit]) -> String {
        credits
            .iter()
            .map(|credit| match (&credit.url, credit.plain) {
                (Some(url), false) => format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                    escape_attr(url),
                    self.fragment(&credit.label)
                ),
                _ => self.fragment(&credit.label),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render_section(&mut self, out: &mut String, section: &ContentSection) {
        match section {
            ContentSection::Abstract(block) => self.render_abstract(out, block),
            ContentSection::Section(s) => self.render_body_section(out, s),
            ContentSection::Bibliography(b) => self.render_bibliography(out, b),
            ContentSection::Unknown { tag } => {
                log::debug!("Skipping section with unknown type {:?}", tag);
                self.stats.skipped_count += 1;
                return;
            }
        }
        self.stats.section_count += 1;
    }

    fn render_abstract(&mut self, out: &mut String, block: &AbstractBlock) {
        let heading = self.fragment(&block.heading);
        let body = self.cited(&block.body);
        out.push_str("<div class=\"abstract\">\n");
        out.push_str(&format!("<h3>{}</h3>\n", heading));
        out.push_str(&format!("<p><strong>{}</strong></p>\n", body));
        out.push_str("<hr>\n</div>\n");
    }

    fn render_body_section(&mut self, out: &mut String, section: &Section) {
        if let Some(ref rules) = section.specific_style {
            self.styles.push_rules(rules);
        }

        out.push_str("<div class=\"section\">\n");
        out.push_str(&format!(
            "<h2>{}</h2>\n",
            escape_html(&section.display_heading())
        ));
        for item in &section.content {
            self.render_item(out, item);
        }
        out.push_str("</div>\n");
    }

    fn render_item(&mut self, out: &mut String, item: &ContentItem) {
        match item {
            ContentItem::Paragraph { text } => {
                self.stats.paragraph_count += 1;
                let text = self.cited(text);
                out.push_str(&format!("<p>{}</p>\n", text));
            }
            ContentItem::Blockquote { text } => {
                self.stats.paragraph_count += 1;
                let text = self.cited(text);
                out.push_str(&format!("<blockquote>{}</blockquote>\n", text));
            }
            ContentItem::Subheader { text } => {
                out.push_str(&format!("<h3>{}</h3>\n", escape_html(text)));
            }
            ContentItem::Definition { term, def } => {
                let term = self.fragment(term);
                let def = self.cited(def);
                out.push_str(&format!(
                    "<div class=\"definition-list\"><span class=\"def-term\">{}:</span> {}</div>\n",
                    term, def
                ));
            }
            ContentItem::List { items } => {
                self.stats.list_count += 1;
                out.push_str("<ul>\n");
                for entry in items {
                    let entry = self.cited(entry);
                    out.push_str(&format!("<li>{}</li>\n", entry));
                }
                out.push_str("</ul>\n");
            }
            ContentItem::Image(image) => self.render_image(out, image),
            ContentItem::Unknown { tag } => {
                log::debug!("Skipping content item with unknown type {:?}", tag);
                self.stats.skipped_count += 1;
            }
        }
    }

    fn render_image(&mut self, out: &mut String, image: &ImageItem) {
        let src = self.images.resolve(image);
        log::debug!("Image {} resolved to {}", self.images.resolved(), src);

        let notice = format!("&#9888; Missing image: {}", escape_html(&src));

        if let Some(ref root) = self.options.asset_root {
            if is_missing(&src, root) {
                log::warn!("Image {} not found under {}", src, root.display());
                self.stats.missing_image_count += 1;
                out.push_str(&format!("<div class=\"missing-image\">{}</div>\n", notice));
                return;
            }
        }

        self.stats.image_count += 1;
        out.push_str("<figure>\n");
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" onerror=\"var f=this.parentNode;f.nextElementSibling.hidden=false;f.remove();\">\n",
            escape_attr(&src),
            escape_attr(&image.alt)
        ));
        out.push_str(&format!(
            "<figcaption>{}</figcaption>\n",
            self.fragment(&image.caption)
        ));
        out.push_str("</figure>\n");
        out.push_str(&format!(
            "<div class=\"missing-image\" hidden>{}</div>\n",
            notice
        ));
    }

    fn render_bibliography(&mut self, out: &mut String, bibliography: &Bibliography) {
        out.push_str("<div class=\"bibliography\">\n");
        out.push_str(&format!(
            "<h2>{}</h2>\n",
            escape_html(&bibliography.heading)
        ));

        for entry in &bibliography.entries {
            self.stats.bibliography_entry_count += 1;
            let id = entry.key();
            let text = self.fragment(&entry.text);
            let content = match entry.link() {
                Some(url) => format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a> <span style=\"font-size:0.8em\">&#8599;</span>",
                    escape_attr(url),
                    text
                ),
                None => text,
            };
            out.push_str(&format!(
                "<div class=\"bib-entry\" id=\"ref-{}\"><span class=\"bib-id\">[{}]</span> {}</div>\n",
                escape_attr(&id),
                escape_html(&id),
                content
            ));
        }

        out.push_str("</div>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_str;
    use crate::render::ImagePolicy;

    fn render(json: &str) -> String {
        let doc = parse_str(json).unwrap();
        to_html(&doc, &RenderOptions::new().with_fragment(true)).unwrap()
    }

    #[test]
    fn test_empty_content_renders_header_only() {
        let html = render(r#"{"meta": {"title": "T", "date": "2024"}, "content": []}"#);
        assert!(html.contains("<h1 class=\"doc-title\">T</h1>"));
        assert!(html.contains("<strong>Date:</strong> 2024"));
        assert!(!html.contains("class=\"section\""));
        assert!(!html.contains("class=\"abstract\""));
        assert!(!html.contains("class=\"bibliography\""));
    }

    #[test]
    fn test_abstract_body_is_cited_and_bold() {
        let html = render(
            r#"{"content": [{"type": "abstract", "heading": "Abstract", "body": "See [1]."}]}"#,
        );
        assert!(html.contains("<h3>Abstract</h3>"));
        assert!(html.contains(
            r##"<p><strong>See <a href="#ref-1" class="citation-link">[1]</a>.</strong></p>"##
        ));
        assert!(html.contains("<hr>"));
    }

    #[test]
    fn test_section_heading_escaped_not_interpreted() {
        let html = render(
            r#"{"content": [{"type": "section", "number": 2, "heading": "A <b>B</b>",
                "content": [{"type": "subheader", "text": "<i>x</i> [1]"}]}]}"#,
        );
        assert!(html.contains("<h2>2. A &lt;b&gt;B&lt;/b&gt;</h2>"));
        assert!(html.contains("<h3>&lt;i&gt;x&lt;/i&gt; [1]</h3>"));
    }

    #[test]
    fn test_definition_and_list() {
        let html = render(
            r#"{"content": [{"type": "section", "heading": "H", "content": [
                {"type": "definition", "term": "Cell", "def": "Unit of life [2]"},
                {"type": "list", "items": ["one [1]", "two"]}
            ]}]}"#,
        );
        assert!(html.contains(
            r##"<div class="definition-list"><span class="def-term">Cell:</span> Unit of life <a href="#ref-2" class="citation-link">[2]</a></div>"##
        ));
        let one = html.find("<li>one").unwrap();
        let two = html.find("<li>two</li>").unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_bibliography_with_and_without_url() {
        let html = render(
            r#"{"content": [{"type": "bibliography", "heading": "References", "entries": [
                {"id": 1, "text": "Plain ref"},
                {"id": 2, "text": "Linked ref", "url": "https://doi.org/x"}
            ]}]}"#,
        );
        assert!(html.contains(
            r#"<div class="bib-entry" id="ref-1"><span class="bib-id">[1]</span> Plain ref</div>"#
        ));
        assert!(html.contains(r#"id="ref-2""#));
        assert!(html.contains(
            r#"<a href="https://doi.org/x" target="_blank" rel="noopener noreferrer">Linked ref</a>"#
        ));
        assert!(html.contains("&#8599;"));
    }

    #[test]
    fn test_bibliography_text_not_cited() {
        let html = render(
            r#"{"content": [{"type": "bibliography", "entries": [{"id": 1, "text": "Vol [3]"}]}]}"#,
        );
        assert!(!html.contains("citation-link"));
    }

    #[test]
    fn test_unknown_tags_skipped() {
        let doc = parse_str(
            r#"{"content": [
                {"type": "appendix", "heading": "Nope"},
                {"type": "section", "heading": "S", "content": [{"type": "video"}, {"type": "paragraph", "text": "kept"}]}
            ]}"#,
        )
        .unwrap();
        let result = to_html_with_stats(&doc, &RenderOptions::new()).unwrap();
        assert!(!result.content.contains("Nope"));
        assert!(result.content.contains("<p>kept</p>"));
        assert_eq!(result.stats.skipped_count, 2);
        assert_eq!(result.stats.section_count, 1);
    }

    #[test]
    fn test_sequential_images_across_sections() {
        let html = render(
            r#"{"content": [
                {"type": "section", "heading": "A", "content": [{"type": "image", "alt": "first", "caption": "c1"}]},
                {"type": "abstract", "heading": "x", "body": "y"},
                {"type": "section", "heading": "B", "content": [{"type": "image", "alt": "second", "caption": "c2"}]}
            ]}"#,
        );
        assert!(html.contains(r#"<img src="1.jpg" alt="first""#));
        assert!(html.contains(r#"<img src="2.jpg" alt="second""#));
        assert!(html.contains("<figcaption>c1</figcaption>"));
        assert!(html.contains("<div class=\"missing-image\" hidden>"));
    }

    #[test]
    fn test_placeholder_images() {
        let doc = parse_str(
            r#"{"content": [{"type": "section", "content": [{"type": "image", "query": "a b"}]}]}"#,
        )
        .unwrap();
        let options = RenderOptions::new().with_image_policy(ImagePolicy::placeholder());
        let html = to_html(&doc, &options).unwrap();
        assert!(html.contains("https://placehold.co/600x300/EEE/31343C?text=a%20b"));
    }

    #[test]
    fn test_missing_image_under_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.jpg"), b"jpg").unwrap();

        let doc = parse_str(
            r#"{"content": [{"type": "section", "content": [
                {"type": "image", "alt": "here"},
                {"type": "image", "alt": "gone"}
            ]}]}"#,
        )
        .unwrap();
        let options = RenderOptions::new().with_asset_root(dir.path());
        let result = to_html_with_stats(&doc, &options).unwrap();

        assert!(result.content.contains(r#"<img src="1.jpg""#));
        assert!(!result.content.contains(r#"<img src="2.jpg""#));
        assert!(result
            .content
            .contains("<div class=\"missing-image\">&#9888; Missing image: 2.jpg</div>"));
        assert_eq!(result.stats.image_count, 1);
        assert_eq!(result.stats.missing_image_count, 1);
    }

    #[test]
    fn test_styles_global_then_sections_once() {
        let doc = parse_str(
            r#"{"config": {"styles": {"body": "margin: 0"}},
                "content": [
                  {"type": "section", "heading": "A", "specific_style": {".a": "color: red"}},
                  {"type": "section", "heading": "B", "specific_style": {".b": "color: blue"}}
                ]}"#,
        )
        .unwrap();
        let html = to_html(&doc, &RenderOptions::new()).unwrap();

        assert_eq!(html.matches("<style").count(), 1);
        let body = html.find("body { margin: 0 }").unwrap();
        let a = html.find(".a { color: red }").unwrap();
        let b = html.find(".b { color: blue }").unwrap();
        assert!(body < a && a < b);
        assert!(html.find("</style>").unwrap() < html.find("<div id=\"app\">").unwrap());
    }

    #[test]
    fn test_theme_variables_on_root() {
        let doc = parse_str(
            r##"{"config": {"theme": {"primary_color": "#003366", "accent_color": "#cc0000"}}}"##,
        )
        .unwrap();
        let html = to_html(&doc, &RenderOptions::new()).unwrap();
        assert!(html.contains(r##"<html lang="en" style="--primary: #003366; --accent: #cc0000;">"##));
        assert!(!html.contains("--secondary"));
    }

    #[test]
    fn test_escape_mode() {
        let doc = parse_str(
            r#"{"meta": {"title": "<script>x</script>"},
                "content": [{"type": "section", "content": [{"type": "paragraph", "text": "<b>hi</b> [1]"}]}]}"#,
        )
        .unwrap();

        let trusted = to_html(&doc, &RenderOptions::new()).unwrap();
        assert!(trusted.contains("<p><b>hi</b> <a href=\"#ref-1\""));

        let escaped = to_html(&doc, &RenderOptions::new().with_escape(true)).unwrap();
        assert!(escaped.contains("<p>&lt;b&gt;hi&lt;/b&gt; <a href=\"#ref-1\""));
        assert!(!escaped.contains("<script>"));
    }

    #[test]
    fn test_full_page_shell() {
        let doc = parse_str(r#"{"meta": {"title": "My <em>Thesis</em>"}}"#).unwrap();
        let html = to_html(&doc, &RenderOptions::new()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>My Thesis</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"style.css\">"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_render_failure_page() {
        let error: Error = crate::error::LoadError::Status {
            code: 404,
            location: "thesis.json".to_string(),
        }
        .into();
        let html = render_failure(&error, &RenderOptions::new());
        assert!(html.contains("Error loading thesis data."));
        assert!(html.contains("run a local server"));
        assert!(!html.contains("doc-header"));
    }
}
