use std::path::Path;
use std::sync::Arc;

use super::types::ToolInvocation;
use crate::config::ToolsConfig;

const OUTPUT_DIR_PLACEHOLDER: &str = "{output_dir}";
const URL_PLACEHOLDER: &str = "{url}";

/// A downloader executable and how to call it
///
/// Argument templates may contain `{output_dir}` and `{url}`. Any other
/// braces are left alone so tool-specific filename formats pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `yt-dlp -P <output_dir> <url>`
    pub fn yt_dlp(program: impl Into<String>) -> Self {
        Self::new("yt-dlp", program, ["-P", OUTPUT_DIR_PLACEHOLDER, URL_PLACEHOLDER])
    }

    /// `gallery-dl -D <output_dir> -f {title}.{extension} <url>`
    pub fn gallery_dl(program: impl Into<String>) -> Self {
        Self::new(
            "gallery-dl",
            program,
            [
                "-D",
                OUTPUT_DIR_PLACEHOLDER,
                "-f",
                "{title}.{extension}",
                URL_PLACEHOLDER,
            ],
        )
    }

    pub fn invocation(&self, url: &str, output_dir: &Path) -> ToolInvocation {
        let dir = output_dir.to_string_lossy();
        let args = self
            .args
            .iter()
            .map(|arg| {
                arg.replace(OUTPUT_DIR_PLACEHOLDER, &dir)
                    .replace(URL_PLACEHOLDER, url)
            })
            .collect();

        ToolInvocation {
            tool: self.name.clone(),
            program: self.program.clone(),
            args,
            url: url.to_string(),
            output_dir: output_dir.to_path_buf(),
        }
    }
}

/// Substring predicate over the submitted URL
#[derive(Debug, Clone)]
pub struct DomainRule {
    patterns: Vec<String>,
    tool: Arc<ToolSpec>,
}

impl DomainRule {
    pub fn new(
        patterns: impl IntoIterator<Item = impl Into<String>>,
        tool: Arc<ToolSpec>,
    ) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            tool,
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| url.contains(pattern.as_str()))
    }

    pub fn tool(&self) -> &ToolSpec {
        &self.tool
    }
}

/// Ordered rule table; the first matching rule picks the tool
#[derive(Debug, Clone, Default)]
pub struct ToolSelector {
    rules: Vec<DomainRule>,
}

impl ToolSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with the lowest priority so far
    pub fn push(&mut self, rule: DomainRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Built-in table: YouTube via yt-dlp, Instagram and TikTok via gallery-dl
    pub fn with_defaults(tools: &ToolsConfig) -> Self {
        let yt_dlp = Arc::new(ToolSpec::yt_dlp(tools.yt_dlp.program.clone()));
        let gallery_dl = Arc::new(ToolSpec::gallery_dl(tools.gallery_dl.program.clone()));

        let mut selector = Self::new();
        selector
            .push(DomainRule::new(["youtube.com", "youtu.be"], yt_dlp))
            .push(DomainRule::new(["instagram.com"], gallery_dl.clone()))
            .push(DomainRule::new(["tiktok.com"], gallery_dl));
        selector
    }

    pub fn select(&self, url: &str) -> Option<&ToolSpec> {
        self.rules
            .iter()
            .find(|rule| rule.matches(url))
            .map(DomainRule::tool)
    }

    pub fn rules(&self) -> &[DomainRule] {
        &self.rules
    }
}
