//! Project-name token substitution
//!
//! Rendering is textual, case-sensitive and single-pass: the project name is
//! inserted literally and never rescanned, so a project name that happens to
//! contain the token does not expand again.

use mirror_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Marker replaced with the target project's name.
pub const DEFAULT_PROJECT_NAME_TOKEN: &str = "{{{PROJECT_NAME}}}";

/// Rendered template lines next to the target's raw lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPair {
    pub template_lines: Vec<String>,
    pub target_lines: Vec<String>,
}

/// Single-pass token substitution over template contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightTemplateEngine {
    token: String,
}

impl Default for LightTemplateEngine {
    fn default() -> Self {
        Self {
            token: DEFAULT_PROJECT_NAME_TOKEN.to_string(),
        }
    }
}

impl LightTemplateEngine {
    /// Engine using [`DEFAULT_PROJECT_NAME_TOKEN`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine using a custom marker.
    ///
    /// The token must be non-empty and must not span lines, since rendering
    /// operates on one line at a time.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::InvalidToken {
                token,
                reason: "token must not be empty".into(),
            });
        }
        if token.contains(['\n', '\r']) {
            return Err(Error::InvalidToken {
                token,
                reason: "token must not contain line breaks".into(),
            });
        }
        tracing::debug!(token = %token, "Using custom project name token");
        Ok(Self { token })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Substitute the token on a single line.
    pub fn render_line(&self, line: &str, project_name: &str) -> String {
        line.replace(&self.token, project_name)
    }

    /// Split `text` into normalized lines and substitute the token on each.
    pub fn render_lines(&self, text: &str, project_name: &str) -> Vec<String> {
        split_lines(text)
            .iter()
            .map(|line| self.render_line(line, project_name))
            .collect()
    }

    /// Substitute the token across a whole text, keeping its original line
    /// endings. Equivalent to line-wise rendering because the token never
    /// contains a line break.
    pub fn render_text(&self, text: &str, project_name: &str) -> String {
        text.replace(&self.token, project_name)
    }

    /// Read and render a template file as lines.
    pub fn render_file(&self, template: &NormalizedPath, project_name: &str) -> Result<Vec<String>> {
        let text = io::read_text(template)?;
        Ok(self.render_lines(&text, project_name))
    }

    /// Render `template` and read `target` verbatim, both as normalized lines.
    pub fn render(
        &self,
        template: &NormalizedPath,
        target: &NormalizedPath,
        project_name: &str,
    ) -> Result<RenderedPair> {
        tracing::trace!(template = %template, file = %target, project = project_name, "Rendering template");
        let template_lines = self.render_file(template, project_name)?;
        let target_lines = read_lines(target)?;
        Ok(RenderedPair {
            template_lines,
            target_lines,
        })
    }
}

/// Read a text file as normalized lines.
pub fn read_lines(path: &NormalizedPath) -> Result<Vec<String>> {
    let text = io::read_text(path)?;
    Ok(split_lines(&text))
}

/// Split text into lines, normalizing `\r\n` and lone `\r` to `\n`.
///
/// Every line keeps its terminator (as `\n`) except a final line that had
/// none, so a missing trailing newline still registers as a difference.
/// Empty text yields no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                current.push('\n');
                lines.push(std::mem::take(&mut current));
            }
            '\n' => {
                current.push('\n');
                lines.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
