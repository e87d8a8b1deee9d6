//! Workspace data models.

use serde::{Deserialize, Serialize};

/// Semantic language tag for a workspace file.
///
/// Derived once at creation from the file name's extension and used by the
/// editing surface for syntax highlighting and by the AI gateway for
/// inference fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    JavaScript,
    TypeScript,
    Json,
    Markdown,
    Python,
}

impl Language {
    /// Map a file extension to a language.
    ///
    /// Unrecognized or missing extensions fall back to `hint`, or to
    /// JavaScript when no hint is given.
    pub fn from_extension(ext: Option<&str>, hint: Option<Language>) -> Self {
        match ext.map(|e| e.to_lowercase()).as_deref() {
            Some("html") => Language::Html,
            Some("css") => Language::Css,
            Some("js") | Some("jsx") => Language::JavaScript,
            Some("ts") | Some("tsx") => Language::TypeScript,
            Some("json") => Language::Json,
            Some("md") => Language::Markdown,
            Some("py") => Language::Python,
            _ => hint.unwrap_or(Language::JavaScript),
        }
    }

    /// Infer the language from a full file name.
    pub fn from_file_name(name: &str, hint: Option<Language>) -> Self {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext);
        Self::from_extension(ext, hint)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Html => write!(f, "html"),
            Language::Css => write!(f, "css"),
            Language::JavaScript => write!(f, "javascript"),
            Language::TypeScript => write!(f, "typescript"),
            Language::Json => write!(f, "json"),
            Language::Markdown => write!(f, "markdown"),
            Language::Python => write!(f, "python"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Language::Html),
            "css" => Ok(Language::Css),
            "javascript" => Ok(Language::JavaScript),
            "typescript" => Ok(Language::TypeScript),
            "json" => Ok(Language::Json),
            "markdown" => Ok(Language::Markdown),
            "python" => Ok(Language::Python),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single editable file held in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceFile {
    /// Opaque unique identifier, stable for the file's lifetime.
    pub id: String,
    /// Display name including extension.
    pub name: String,
    /// Full text buffer, replaced wholesale on every edit.
    pub content: String,
    /// Language tag derived from the name at creation.
    pub language: Language,
    /// Legacy display flag. The authoritative pointer is the store's
    /// `active_file_id`; this flag is kept in sync for UI compatibility
    /// only and must not be treated as source of truth.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_known_extensions() {
        assert_eq!(Language::from_file_name("a.html", None), Language::Html);
        assert_eq!(Language::from_file_name("a.css", None), Language::Css);
        assert_eq!(Language::from_file_name("a.js", None), Language::JavaScript);
        assert_eq!(Language::from_file_name("a.jsx", None), Language::JavaScript);
        assert_eq!(Language::from_file_name("a.ts", None), Language::TypeScript);
        assert_eq!(Language::from_file_name("a.tsx", None), Language::TypeScript);
        assert_eq!(Language::from_file_name("a.json", None), Language::Json);
        assert_eq!(Language::from_file_name("a.md", None), Language::Markdown);
        assert_eq!(Language::from_file_name("a.py", None), Language::Python);
    }

    #[test]
    fn test_language_fallback_is_javascript() {
        assert_eq!(Language::from_file_name("a.xyz", None), Language::JavaScript);
        assert_eq!(Language::from_file_name("noext", None), Language::JavaScript);
    }

    #[test]
    fn test_language_fallback_prefers_hint() {
        assert_eq!(
            Language::from_file_name("a.xyz", Some(Language::Python)),
            Language::Python
        );
        // A recognized extension beats the hint.
        assert_eq!(
            Language::from_file_name("a.css", Some(Language::Python)),
            Language::Css
        );
    }

    #[test]
    fn test_language_extension_is_case_insensitive() {
        assert_eq!(Language::from_file_name("A.HTML", None), Language::Html);
    }

    #[test]
    fn test_language_roundtrip() {
        for lang in [
            Language::Html,
            Language::Css,
            Language::JavaScript,
            Language::TypeScript,
            Language::Json,
            Language::Markdown,
            Language::Python,
        ] {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
        }
    }
}
