//! Code block languages understood by Notion.

/// Language Notion falls back to for anything it does not recognise.
pub const PLAIN_TEXT_LANGUAGE: &str = "plain text";

/// Languages accepted by the `code.language` field of the Notion API.
const NOTION_CODE_LANGUAGES: &[&str] = &[
    "abap",
    "arduino",
    "bash",
    "basic",
    "c",
    "clojure",
    "coffeescript",
    "c++",
    "c#",
    "css",
    "dart",
    "diff",
    "docker",
    "elixir",
    "elm",
    "erlang",
    "flow",
    "fortran",
    "f#",
    "gherkin",
    "glsl",
    "go",
    "graphql",
    "groovy",
    "haskell",
    "html",
    "java",
    "javascript",
    "json",
    "julia",
    "kotlin",
    "latex",
    "less",
    "lisp",
    "livescript",
    "lua",
    "makefile",
    "markdown",
    "markup",
    "matlab",
    "mermaid",
    "nix",
    "objective-c",
    "ocaml",
    "pascal",
    "perl",
    "php",
    "plain text",
    "powershell",
    "prolog",
    "protobuf",
    "python",
    "r",
    "reason",
    "ruby",
    "rust",
    "sass",
    "scala",
    "scheme",
    "scss",
    "shell",
    "sql",
    "swift",
    "typescript",
    "vb.net",
    "verilog",
    "vhdl",
    "visual basic",
    "webassembly",
    "xml",
    "yaml",
];

/// Common fence info strings that name a Notion language differently.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("sh", "shell"),
    ("zsh", "shell"),
    ("console", "shell"),
    ("shell-session", "shell"),
    ("py", "python"),
    ("python3", "python"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("rs", "rust"),
    ("rb", "ruby"),
    ("yml", "yaml"),
    ("cpp", "c++"),
    ("cxx", "c++"),
    ("cc", "c++"),
    ("h", "c"),
    ("cs", "c#"),
    ("csharp", "c#"),
    ("fsharp", "f#"),
    ("golang", "go"),
    ("kt", "kotlin"),
    ("hs", "haskell"),
    ("ex", "elixir"),
    ("exs", "elixir"),
    ("objc", "objective-c"),
    ("ps1", "powershell"),
    ("pwsh", "powershell"),
    ("tex", "latex"),
    ("md", "markdown"),
    ("dockerfile", "docker"),
    ("make", "makefile"),
    ("proto", "protobuf"),
    ("wasm", "webassembly"),
    ("vb", "visual basic"),
    ("text", "plain text"),
    ("txt", "plain text"),
    ("plaintext", "plain text"),
];

/// Maps a fenced code block's info string to a Notion language.
///
/// Only the first word of the info string counts (` ```rust,ignore ` and
/// ` ```python title="x" ` both work); unknown languages become `"plain text"`.
pub fn notion_language(info: &str) -> &'static str {
    let word = info
        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    if word.is_empty() {
        return PLAIN_TEXT_LANGUAGE;
    }

    if let Some(language) = NOTION_CODE_LANGUAGES.iter().find(|l| **l == word) {
        return *language;
    }

    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == word)
        .map(|(_, language)| *language)
        .unwrap_or(PLAIN_TEXT_LANGUAGE)
}
