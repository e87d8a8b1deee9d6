//! File-type inference and prompt construction.
//!
//! Both are deterministic: the same instruction and file context always
//! produce the same prompt, so generation variance comes only from the
//! endpoint itself.

use crate::workspace::{Language, WorkspaceFile};

/// The kind of artifact an instruction asks for.
///
/// Narrower than [`Language`]: it decides the extension of generated files
/// and the label embedded in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Html,
    Css,
    JavaScript,
}

impl FileKind {
    /// Human-readable label used inside prompts.
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Html => "HTML",
            FileKind::Css => "CSS",
            FileKind::JavaScript => "JavaScript",
        }
    }

    /// Extension for generated file names.
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Html => "html",
            FileKind::Css => "css",
            FileKind::JavaScript => "js",
        }
    }

    /// Language tag for generated files.
    pub fn language(&self) -> Language {
        match self {
            FileKind::Html => Language::Html,
            FileKind::Css => Language::Css,
            FileKind::JavaScript => Language::JavaScript,
        }
    }
}

impl From<Language> for FileKind {
    fn from(language: Language) -> Self {
        match language {
            Language::Css => FileKind::Css,
            Language::JavaScript | Language::TypeScript => FileKind::JavaScript,
            // Html, and everything without a closer match, renders in the
            // preview iframe as markup.
            _ => FileKind::Html,
        }
    }
}

/// Infer the target file kind from an instruction.
///
/// Scans the lowercased instruction for substring markers in a fixed
/// priority order; the first matching rule wins. Later generations depend on
/// this order for extension selection, so it must not be reordered. Falls
/// back to the current file's language when one is open, else HTML.
pub fn infer_file_kind(instruction: &str, current: Option<&WorkspaceFile>) -> FileKind {
    let lower = instruction.to_lowercase();

    if lower.contains("css") || lower.contains("style") {
        FileKind::Css
    } else if lower.contains("javascript") || lower.contains("js") || lower.contains("script") {
        FileKind::JavaScript
    } else if lower.contains("html") || lower.contains("webpage") || lower.contains("website") {
        FileKind::Html
    } else if let Some(file) = current {
        FileKind::from(file.language)
    } else {
        FileKind::Html
    }
}

/// Build the edit-mode prompt: the model sees the whole file and must return
/// the whole modified file.
pub fn edit_prompt(file: &WorkspaceFile, kind: FileKind, instruction: &str) -> String {
    format!(
        "You are a coding assistant editing the file \"{name}\" ({label}).\n\n\
         Current content:\n{content}\n\n\
         Instruction: {instruction}\n\n\
         Return the complete modified file. Respond with code only, \
         without explanations or markdown fences.",
        name = file.name,
        label = kind.label(),
        content = file.content,
        instruction = instruction,
    )
}

/// Build the generate-mode prompt for a brand-new artifact.
pub fn generate_prompt(kind: FileKind, instruction: &str) -> String {
    let responsive = match kind {
        FileKind::Html | FileKind::Css => " Make the result responsive.",
        FileKind::JavaScript => "",
    };
    format!(
        "Generate {label} code for the following request: {instruction}\n\n\
         Return complete, syntactically valid, ready-to-use code. Respond \
         with code only, without explanations or markdown fences.{responsive}",
        label = kind.label(),
        instruction = instruction,
        responsive = responsive,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::WorkspaceStore;

    fn file(name: &str, content: &str) -> WorkspaceFile {
        let mut store = WorkspaceStore::new();
        store.create_file(name, content, None).clone()
    }

    #[test]
    fn test_inference_css_markers() {
        assert_eq!(infer_file_kind("add css for the header", None), FileKind::Css);
        assert_eq!(infer_file_kind("restyle the page", None), FileKind::Css);
    }

    #[test]
    fn test_inference_javascript_markers() {
        assert_eq!(infer_file_kind("some javascript please", None), FileKind::JavaScript);
        assert_eq!(infer_file_kind("write a click script", None), FileKind::JavaScript);
    }

    #[test]
    fn test_inference_html_markers() {
        assert_eq!(infer_file_kind("build a webpage", None), FileKind::Html);
        assert_eq!(infer_file_kind("a portfolio website", None), FileKind::Html);
    }

    #[test]
    fn test_inference_priority_order_first_match_wins() {
        // "css" outranks "javascript" even though both appear.
        assert_eq!(
            infer_file_kind("add css style and javascript", None),
            FileKind::Css
        );
        // "js" outranks "html".
        assert_eq!(
            infer_file_kind("add js to the html page", None),
            FileKind::JavaScript
        );
    }

    #[test]
    fn test_inference_falls_back_to_current_file() {
        let css = file("theme.xyz", "");
        // "theme.xyz" falls back to the JavaScript language default.
        assert_eq!(
            infer_file_kind("make it nicer", Some(&css)),
            FileKind::JavaScript
        );

        let markup = file("page.html", "");
        assert_eq!(infer_file_kind("make it nicer", Some(&markup)), FileKind::Html);
    }

    #[test]
    fn test_inference_defaults_to_html() {
        assert_eq!(infer_file_kind("make something pretty", None), FileKind::Html);
    }

    #[test]
    fn test_edit_prompt_embeds_context() {
        let f = file("app.js", "console.log(1);");
        let prompt = edit_prompt(&f, FileKind::JavaScript, "log two instead");

        assert!(prompt.contains("\"app.js\""));
        assert!(prompt.contains("(JavaScript)"));
        assert!(prompt.contains("console.log(1);"));
        assert!(prompt.contains("log two instead"));
        assert!(prompt.contains("complete modified file"));
    }

    #[test]
    fn test_generate_prompt_is_deterministic() {
        let a = generate_prompt(FileKind::Css, "dark theme");
        let b = generate_prompt(FileKind::Css, "dark theme");
        assert_eq!(a, b);
        assert!(a.contains("Make the result responsive."));
    }

    #[test]
    fn test_generate_prompt_javascript_skips_responsive_hint() {
        let prompt = generate_prompt(FileKind::JavaScript, "debounce helper");
        assert!(!prompt.contains("responsive"));
    }

    #[test]
    fn test_kind_metadata() {
        assert_eq!(FileKind::Css.extension(), "css");
        assert_eq!(FileKind::JavaScript.extension(), "js");
        assert_eq!(FileKind::Html.extension(), "html");
        assert_eq!(FileKind::Css.language(), Language::Css);
    }
}
