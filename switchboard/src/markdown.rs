//! Markup conversion for wiki page bodies
//!
//! Confluence stores page bodies as XHTML ("storage format"). Reads convert
//! that to Markdown through an ordered chain of converter strategies: the
//! first strategy that produces output wins, and the operation fails only
//! when every strategy has failed. Writes go the other way, rendering
//! Markdown to storage HTML.
//!
//! Conversion keeps link targets, keeps table content, and references
//! images by URL instead of inlining them.

use pulldown_cmark::{html, Options, Parser};

use crate::error::{Result, SwitchboardError};

/// One HTML→Markdown conversion backend
pub trait ConvertStrategy: Send + Sync {
    /// Short name used in logs and failure reports
    fn name(&self) -> &'static str;

    fn convert(&self, html: &str) -> Result<String>;
}

/// html5ever-based converter; understands tables, lists, images and links
struct Html2mdStrategy;

impl ConvertStrategy for Html2mdStrategy {
    fn name(&self) -> &'static str {
        "html2md"
    }

    fn convert(&self, html: &str) -> Result<String> {
        Ok(html2md::parse_html(html))
    }
}

/// Turndown-style converter; flattens tables to text but keeps links intact
struct HtmdStrategy;

impl ConvertStrategy for HtmdStrategy {
    fn name(&self) -> &'static str {
        "htmd"
    }

    fn convert(&self, html: &str) -> Result<String> {
        htmd::HtmlToMarkdown::builder()
            .skip_tags(vec!["script", "style"])
            .build()
            .convert(html)
            .map_err(|e| SwitchboardError::Other(format!("htmd conversion failed: {e}")))
    }
}

/// Ordered HTML→Markdown converter chain
pub struct MarkdownConverter {
    strategies: Vec<Box<dyn ConvertStrategy>>,
}

impl MarkdownConverter {
    /// The production chain, highest fidelity first
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(Html2mdStrategy), Box::new(HtmdStrategy)],
        }
    }

    /// A chain with explicit strategies, for exercising fallback behavior
    pub fn with_strategies(strategies: Vec<Box<dyn ConvertStrategy>>) -> Self {
        Self { strategies }
    }

    /// Convert storage HTML to Markdown via the first strategy that works.
    ///
    /// # Errors
    ///
    /// `SwitchboardError::ParserUnavailable` when every strategy in the
    /// chain has failed.
    pub fn html_to_markdown(&self, html: &str) -> Result<String> {
        if html.trim().is_empty() {
            return Ok(String::new());
        }

        let mut failures: Vec<String> = Vec::new();
        for strategy in &self.strategies {
            match strategy.convert(html) {
                Ok(markdown) => {
                    if !failures.is_empty() {
                        tracing::debug!(
                            "markup conversion succeeded via fallback '{}'",
                            strategy.name()
                        );
                    }
                    return Ok(tidy(&markdown));
                }
                Err(e) => {
                    tracing::warn!("markup strategy '{}' failed: {}", strategy.name(), e);
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        Err(SwitchboardError::ParserUnavailable(format!(
            "no converter strategy succeeded ({})",
            failures.join("; ")
        )))
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render Markdown to Confluence storage HTML (tables and fenced code enabled)
pub fn markdown_to_storage(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Collapse runs of blank lines left behind by block-level conversion
fn tidy(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut blank_run = 0;
    for line in markdown.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<h1>Release runbook</h1>
<p>See <a href="https://wiki.example.com/deploy">the deploy guide</a> first.</p>
<table><tr><th>Step</th><th>Owner</th></tr><tr><td>Freeze</td><td>Dana</td></tr></table>
<p><img src="https://wiki.example.com/diagram.png" alt="diagram"/></p>"#;

    struct FailingStrategy;

    impl ConvertStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn convert(&self, _html: &str) -> Result<String> {
            Err(SwitchboardError::Other("simulated unavailable".to_string()))
        }
    }

    #[test]
    fn test_primary_chain_preserves_links_tables_and_images() {
        let markdown = MarkdownConverter::new()
            .html_to_markdown(PAGE)
            .expect("conversion succeeds");

        assert!(markdown.contains("https://wiki.example.com/deploy"));
        assert!(markdown.contains("Freeze"));
        assert!(markdown.contains("Dana"));
        // image referenced by URL, not inlined
        assert!(markdown.contains("diagram.png"));
    }

    #[test]
    fn test_fallback_engages_when_primary_fails() {
        let chain = MarkdownConverter::with_strategies(vec![
            Box::new(FailingStrategy),
            Box::new(Html2mdStrategy),
        ]);

        let markdown = chain.html_to_markdown(PAGE).expect("fallback succeeds");
        assert!(markdown.contains("https://wiki.example.com/deploy"));
        assert!(markdown.contains("Freeze"));
    }

    #[test]
    fn test_all_strategies_failing_is_parser_unavailable() {
        let chain = MarkdownConverter::with_strategies(vec![
            Box::new(FailingStrategy),
            Box::new(FailingStrategy),
        ]);

        let err = chain.html_to_markdown(PAGE).unwrap_err();
        assert!(matches!(err, SwitchboardError::ParserUnavailable(_)));
        assert!(err.to_string().contains("failing"));
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        let markdown = MarkdownConverter::new()
            .html_to_markdown("   ")
            .expect("empty ok");
        assert_eq!(markdown, "");
    }

    #[test]
    fn test_markdown_to_storage_renders_tables_and_code() {
        let markdown = "# Plan\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```\nréuse\n```\n";
        let storage = markdown_to_storage(markdown);

        assert!(storage.contains("<h1>"));
        assert!(storage.contains("<table>"));
        assert!(storage.contains("<code>"));
    }

    #[test]
    fn test_tidy_collapses_blank_runs() {
        assert_eq!(tidy("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(tidy("a  \nb"), "a\nb");
    }
}
