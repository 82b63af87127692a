//! Icon classification module
//!
//! Picks the listing icon for a directory entry from an ordered rule table.
//! Rules are evaluated top to bottom and the first match wins, so the order
//! of `ICON_RULES` is part of the behavior.

/// Listing icon, named after the asset it points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Folder,
    Exploit,
    Json,
    Text,
    Go,
    Python,
    Rust,
    Shell,
    Java,
    Yaml,
    JavaScript,
    CSharp,
    PowerPoint,
    Word,
    Excel,
    Pdf,
    Iso,
    Archive,
    Exe,
    Dmg,
    VirtualMachine,
    Image,
    Generic,
}

impl Icon {
    /// Asset file name under the icon route
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Folder => "folder-open-regular.svg",
            Self::Exploit => "exploit_icon.svg",
            Self::Json => "json_icon.svg",
            Self::Text => "file-lines-regular.svg",
            Self::Go => "golang-brands-solid.svg",
            Self::Python => "python_icon.svg",
            Self::Rust => "rust-brands-solid.svg",
            Self::Shell => "sh_icon.svg",
            Self::Java => "java_icon.svg",
            Self::Yaml => "filetype_yml_icon.svg",
            Self::JavaScript => "javascript_icon.svg",
            Self::CSharp => "c_sharp_icon.svg",
            Self::PowerPoint => "office365_powerpoint_icon.svg",
            Self::Word => "office365_word_icon.svg",
            Self::Excel => "office365_excel_icon.svg",
            Self::Pdf => "pdf_icon.svg",
            Self::Iso => "iso_icon.png",
            Self::Archive => "archive_icon.svg",
            Self::Exe => "exe_icon.svg",
            Self::Dmg => "dmg_icon.svg",
            Self::VirtualMachine => "vm_icon.svg",
            Self::Image => "image_icon.svg",
            Self::Generic => "file_empty_icon.svg",
        }
    }
}

/// Rule predicate
#[derive(Debug, Clone, Copy)]
enum Matcher {
    Directory,
    /// Case-sensitive substring of the full name
    Contains(&'static str),
    /// Case-sensitive suffix of the full name
    Suffix(&'static str),
    /// Lower-cased final extension (dot included) is one of these
    Extension(&'static [&'static str]),
}

#[derive(Debug)]
struct IconRule {
    matcher: Matcher,
    icon: Icon,
}

const fn rule(matcher: Matcher, icon: Icon) -> IconRule {
    IconRule { matcher, icon }
}

static ICON_RULES: &[IconRule] = &[
    rule(Matcher::Directory, Icon::Folder),
    rule(Matcher::Contains("exploit"), Icon::Exploit),
    rule(Matcher::Suffix(".json"), Icon::Json),
    rule(Matcher::Suffix(".txt"), Icon::Text),
    rule(Matcher::Suffix(".go"), Icon::Go),
    rule(Matcher::Suffix(".py"), Icon::Python),
    rule(Matcher::Suffix(".rs"), Icon::Rust),
    rule(Matcher::Suffix(".sh"), Icon::Shell),
    rule(Matcher::Suffix(".jar"), Icon::Java),
    rule(Matcher::Suffix(".yaml"), Icon::Yaml),
    rule(Matcher::Suffix(".yml"), Icon::Yaml),
    rule(Matcher::Suffix(".js"), Icon::JavaScript),
    rule(Matcher::Suffix(".ts"), Icon::JavaScript),
    rule(Matcher::Suffix(".cs"), Icon::CSharp),
    rule(Matcher::Suffix(".ppt"), Icon::PowerPoint),
    rule(Matcher::Extension(&[".doc", ".docx"]), Icon::Word),
    rule(Matcher::Extension(&[".xlsx", ".xls", ".csv"]), Icon::Excel),
    rule(Matcher::Suffix(".pdf"), Icon::Pdf),
    rule(Matcher::Suffix(".iso"), Icon::Iso),
    rule(
        Matcher::Extension(&[".tar", ".tgz", ".zip", ".7zip", ".pkzip", ".gzip"]),
        Icon::Archive,
    ),
    rule(Matcher::Suffix(".exe"), Icon::Exe),
    rule(Matcher::Suffix(".dmg"), Icon::Dmg),
    rule(
        Matcher::Extension(&[".vmdk", ".ova", ".ovf", ".qcow2", ".qcow"]),
        Icon::VirtualMachine,
    ),
    rule(
        Matcher::Extension(&[".jpg", ".png", ".gif", ".svg", ".webp", ".jpeg"]),
        Icon::Image,
    ),
    rule(Matcher::Suffix(".HEIC"), Icon::Image),
];

/// Final extension including the dot, lower-cased
///
/// A name with a leading dot and no other (`.csv`) is all extension.
fn lower_extension(name: &str) -> Option<String> {
    name.rfind('.').map(|i| name[i..].to_ascii_lowercase())
}

impl Matcher {
    fn matches(self, name: &str, is_dir: bool, extension: Option<&str>) -> bool {
        match self {
            Self::Directory => is_dir,
            Self::Contains(needle) => name.contains(needle),
            Self::Suffix(suffix) => name.ends_with(suffix),
            Self::Extension(set) => extension.is_some_and(|ext| set.contains(&ext)),
        }
    }
}

/// Classify a directory entry; total over all inputs
pub fn classify(name: &str, is_dir: bool) -> Icon {
    let extension = lower_extension(name);
    ICON_RULES
        .iter()
        .find(|rule| rule.matcher.matches(name, is_dir, extension.as_deref()))
        .map_or(Icon::Generic, |rule| rule.icon)
}
