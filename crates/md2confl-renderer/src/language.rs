//! Code block languages supported by the Confluence `{code}` macro.
//!
//! Markdown fence hints follow the GitHub Linguist vocabulary (`js`, `golang`,
//! `objective-c++`, ...) while Confluence accepts a small closed set of
//! identifiers. [`Language::resolve`] bridges the two through a flattened
//! alias map built once on first use.
//!
//! See <https://confluence.atlassian.com/doc/code-block-macro-139390.html>.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Language identifier accepted by the Confluence code block macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "&'static str"))]
pub enum Language {
    ActionScript,
    Ada,
    AppleScript,
    Bash,
    C,
    CSharp,
    CPlusPlus,
    Css,
    Erlang,
    Go,
    Groovy,
    Haskell,
    Html,
    Java,
    JavaScript,
    Json,
    Lua,
    /// No recognized language. Confluence renders the block without highlighting.
    None,
    Nyan,
    ObjectiveC,
    Perl,
    Php,
    PowerShell,
    Python,
    R,
    Ruby,
    Sass,
    Scala,
    Sql,
    Swift,
    VisualBasic,
    Xml,
    Yaml,
}

impl Language {
    /// Every language, including the [`Language::None`] sentinel.
    pub const ALL: [Self; 33] = [
        Self::ActionScript,
        Self::Ada,
        Self::AppleScript,
        Self::Bash,
        Self::C,
        Self::CSharp,
        Self::CPlusPlus,
        Self::Css,
        Self::Erlang,
        Self::Go,
        Self::Groovy,
        Self::Haskell,
        Self::Html,
        Self::Java,
        Self::JavaScript,
        Self::Json,
        Self::Lua,
        Self::None,
        Self::Nyan,
        Self::ObjectiveC,
        Self::Perl,
        Self::Php,
        Self::PowerShell,
        Self::Python,
        Self::R,
        Self::Ruby,
        Self::Sass,
        Self::Scala,
        Self::Sql,
        Self::Swift,
        Self::VisualBasic,
        Self::Xml,
        Self::Yaml,
    ];

    /// Token emitted into `{code:language=...}`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActionScript => "actionscript",
            Self::Ada => "ada",
            Self::AppleScript => "applescript",
            Self::Bash => "bash",
            Self::C => "c",
            Self::CSharp => "c#",
            Self::CPlusPlus => "c++",
            Self::Css => "css",
            Self::Erlang => "erlang",
            Self::Go => "go",
            Self::Groovy => "groovy",
            Self::Haskell => "haskell",
            Self::Html => "html",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Json => "json",
            Self::Lua => "lua",
            Self::None => "none",
            Self::Nyan => "nyan",
            Self::ObjectiveC => "objc",
            Self::Perl => "perl",
            Self::Php => "php",
            Self::PowerShell => "powershell",
            Self::Python => "python",
            Self::R => "r",
            Self::Ruby => "ruby",
            Self::Sass => "sass",
            Self::Scala => "scala",
            Self::Sql => "sql",
            Self::Swift => "swift",
            Self::VisualBasic => "visualbasic",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
        }
    }

    /// Markdown fence hints that map to this language.
    ///
    /// Empty for [`Language::None`].
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        ALIAS_TABLE
            .iter()
            .find(|(language, _)| *language == self)
            .map_or(&[] as &[&str], |&(_, aliases)| aliases)
    }

    /// Resolve a Markdown fence hint to a Confluence language.
    ///
    /// Lookup is case-insensitive. Absent and unknown hints resolve to
    /// [`Language::None`] so the emitted macro is always valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use md2confl_renderer::Language;
    ///
    /// assert_eq!(Language::resolve(Some("golang")), Language::Go);
    /// assert_eq!(Language::resolve(Some("JS")), Language::JavaScript);
    /// assert_eq!(Language::resolve(Some("pony")), Language::None);
    /// assert_eq!(Language::resolve(None), Language::None);
    /// ```
    #[must_use]
    pub fn resolve(hint: Option<&str>) -> Self {
        let Some(hint) = hint else {
            return Self::None;
        };
        let lowered = hint.to_lowercase();
        if let Some(language) = MARKDOWN_TO_WIKI.get(lowered.as_str()) {
            *language
        } else {
            tracing::debug!(hint, "Unknown code block language, falling back to none");
            Self::None
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Language> for &'static str {
    fn from(language: Language) -> Self {
        language.as_str()
    }
}

/// Error returned when parsing an unknown Confluence language token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown Confluence language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Parse a canonical Confluence token such as `objc` or `c#`.
    ///
    /// Markdown aliases are not accepted here; use [`Language::resolve`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

impl TryFrom<String> for Language {
    type Error = UnknownLanguage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Canonical language to Markdown fence hints.
///
/// Aliases are lowercase and unique across the whole table.
/// Source: <https://github.com/github/linguist/blob/master/lib/linguist/languages.yml>
static ALIAS_TABLE: &[(Language, &[&str])] = &[
    (
        Language::ActionScript,
        &["actionscript", "actionscript 3", "actionscript3", "as3"],
    ),
    (Language::Ada, &["ada", "ada95", "ada2005"]),
    (Language::AppleScript, &["applescript", "osascript"]),
    (
        Language::Bash,
        &[
            "abuild",
            "alpine abuild",
            "apkbuild",
            "bash",
            "bash session",
            "console",
            "gentoo ebuild",
            "gentoo eclass",
            "openrc",
            "openrc runscript",
            "sh",
            "shell",
            "shell-script",
            "shellsession",
            "tcsh",
            "zsh",
        ],
    ),
    (Language::C, &["c"]),
    (Language::CSharp, &["c#", "csharp", "eq", "uno"]),
    (
        Language::CPlusPlus,
        &[
            "ags",
            "ags script",
            "asymptote",
            "byond",
            "c++",
            "cpp",
            "cuda",
            "dm",
            "dtrace",
            "dtrace-script",
            "edje data collection",
            "game maker language",
            "holyc",
            "metal",
            "mql4",
            "mql5",
            "oncrpc",
            "opencl",
            "rpc",
            "rpcgen",
            "squirrel",
            "swig",
            "unified parallel c",
            "x bitmap",
            "x pixmap",
            "xbm",
            "xc",
            "xdr",
            "xpm",
            "xs",
        ],
    ),
    (Language::Css, &["css"]),
    (Language::Erlang, &["erlang"]),
    (Language::Go, &["go", "golang", "v", "vlang"]),
    (Language::Groovy, &["groovy", "nextflow"]),
    (
        Language::Haskell,
        &[
            "c2hs",
            "c2hs haskell",
            "cabal",
            "cabal config",
            "dhall",
            "frege",
            "gf",
            "grammatical framework",
            "haskell",
            "purescript",
        ],
    ),
    (
        Language::Html,
        &["html", "kit", "mtml", "riot", "svelte", "vue", "xhtml"],
    ),
    (
        Language::Java,
        &["apex", "chuck", "jasmin", "java", "unrealscript"],
    ),
    (
        Language::JavaScript,
        &[
            "cycript",
            "javascript",
            "javascript+erb",
            "js",
            "json with comments",
            "json5",
            "jsonc",
            "jsonld",
            "jsx",
            "node",
            "tsx",
        ],
    ),
    (
        Language::Json,
        &[
            "ecere projects",
            "ipython notebook",
            "json",
            "jupyter notebook",
            "max",
            "max/msp",
            "maxmsp",
        ],
    ),
    (Language::Lua, &["lua", "terra"]),
    // Not a Linguist language
    (Language::Nyan, &["nyan"]),
    (
        Language::ObjectiveC,
        &[
            "obj-c",
            "obj-c++",
            "objc",
            "objc++",
            "objective-c",
            "objective-c++",
            "objectivec",
            "objectivec++",
        ],
    ),
    (
        Language::Perl,
        &["cperl", "perl", "perl-6", "perl6", "pod", "pod 6", "raku"],
    ),
    (
        Language::Php,
        &["hack", "html+php", "inc", "php", "zephir"],
    ),
    (Language::PowerShell, &["posh", "powershell", "pwsh"]),
    (
        Language::Python,
        &[
            "bazel",
            "bzl",
            "easybuild",
            "gn",
            "python",
            "python3",
            "ren'py",
            "renpy",
            "rusthon",
            "sage",
            "starlark",
        ],
    ),
    (Language::R, &["r", "rscript", "splus"]),
    (
        Language::Ruby,
        &[
            "crystal",
            "hcl",
            "jruby",
            "macruby",
            "mirah",
            "rake",
            "rb",
            "rbx",
            "ruby",
            "terraform",
        ],
    ),
    (Language::Sass, &["sass", "scss"]),
    (Language::Scala, &["scala"]),
    (
        Language::Sql,
        &["hiveql", "plsql", "sql", "sqlpl", "tsql"],
    ),
    (Language::Swift, &["swift"]),
    (
        Language::VisualBasic,
        &[
            "vba",
            "vb6",
            "visual basic 6",
            "visual basic for applications",
            "visual basic .net",
            "vbnet",
            "vb .net",
            "vb.net",
        ],
    ),
    (
        Language::Xml,
        &[
            "ant build system",
            "collada",
            "eagle",
            "genshi",
            "labview",
            "maven pom",
            "rss",
            "svg",
            "web ontology language",
            "wsdl",
            "xml",
            "xml property list",
            "xml+genshi",
            "xml+kid",
            "xpages",
            "xproc",
            "xsd",
            "xsl",
            "xslt",
        ],
    ),
    (
        Language::Yaml,
        &[
            "common workflow language",
            "cwl",
            "lookml",
            "raml",
            "salt",
            "saltstack",
            "saltstate",
            "spline font database",
            "unity3d asset",
            "yaml",
            "yml",
        ],
    ),
];

/// Flattened alias map: lowercase fence hint to language.
static MARKDOWN_TO_WIKI: LazyLock<HashMap<&'static str, Language>> = LazyLock::new(|| {
    ALIAS_TABLE
        .iter()
        .flat_map(|(language, aliases)| aliases.iter().map(move |alias| (*alias, *language)))
        .collect()
});

/// The canonical language to alias table, in declaration order.
#[must_use]
pub fn alias_table() -> &'static [(Language, &'static [&'static str])] {
    ALIAS_TABLE
}
