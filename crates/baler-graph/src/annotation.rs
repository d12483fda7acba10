//! Annotation scanning.
//!
//! Source files without a module system declare their edges through comment
//! annotations such as `// @require util.js`. The grammar is deliberately
//! dumb: a trimmed line matches if it contains `@<word>`, optionally
//! followed by whitespace-separated arguments running to the end of the
//! line. There is no escaping and no multi-line form, and a `@require`
//! inside an ordinary comment is indistinguishable from an active one.
//! Fixture trees rely on that ambiguity, so it is preserved.

use rustc_hash::FxHashMap;

/// The closed set of annotation kinds the resolver understands.
///
/// `Root` and `NoCompile` are parameterless flags; every other kind takes
/// one or more path arguments. Words outside this set are skipped by the
/// scanner rather than reported, which lets the same scanner serve
/// pipelines with different vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// `@require <path>...` — script dependency relative to the current file.
    Require,
    /// `@requireRemote <path>...` — script dependency under the shared remote root.
    RequireRemote,
    /// `@requireStyle <path>...` — stylesheet reference, never recursed into.
    RequireStyle,
    /// `@requireRemoteStyle <path>...` — stylesheet under the remote root.
    RequireRemoteStyle,
    /// `@root` — this file is a package boundary.
    Root,
    /// `@nocompile` — exempt from minification.
    NoCompile,
    /// `@tests <path>...` — script dependency under the tests source root.
    Tests,
    /// `@testsRemote <path>...` — remote-flavored variant of `@tests`.
    TestsRemote,
}

impl AnnotationKind {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "require" => Some(Self::Require),
            "requireRemote" => Some(Self::RequireRemote),
            "requireStyle" => Some(Self::RequireStyle),
            "requireRemoteStyle" => Some(Self::RequireRemoteStyle),
            "root" => Some(Self::Root),
            "nocompile" => Some(Self::NoCompile),
            "tests" => Some(Self::Tests),
            "testsRemote" => Some(Self::TestsRemote),
            _ => None,
        }
    }

    pub fn as_word(&self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::RequireRemote => "requireRemote",
            Self::RequireStyle => "requireStyle",
            Self::RequireRemoteStyle => "requireRemoteStyle",
            Self::Root => "root",
            Self::NoCompile => "nocompile",
            Self::Tests => "tests",
            Self::TestsRemote => "testsRemote",
        }
    }

    /// Flag kinds carry no arguments and always record order index 0.
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Root | Self::NoCompile)
    }
}

/// Every kind the dependency resolver wires up.
pub const RESOLVER_KINDS: &[AnnotationKind] = &[
    AnnotationKind::Require,
    AnnotationKind::RequireRemote,
    AnnotationKind::RequireStyle,
    AnnotationKind::RequireRemoteStyle,
    AnnotationKind::Root,
    AnnotationKind::NoCompile,
    AnnotationKind::Tests,
    AnnotationKind::TestsRemote,
];

/// One annotation occurrence: which kind, and where its argument landed in
/// that kind's bucket. The sequence of these in file-scan order is the only
/// record of how to interleave kinds back into original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEntry {
    pub kind: AnnotationKind,
    pub index: usize,
}

/// Scan output: per-kind ordered buckets plus the cross-kind order record.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    arguments: FxHashMap<AnnotationKind, Vec<String>>,
    flags: FxHashMap<AnnotationKind, bool>,
    order: Vec<OrderEntry>,
}

impl AnnotationSet {
    /// Ordered arguments collected for a parameterized kind.
    pub fn arguments(&self, kind: AnnotationKind) -> &[String] {
        self.arguments.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Whether a flag kind was present at least once.
    pub fn flag(&self, kind: AnnotationKind) -> bool {
        self.flags.get(&kind).copied().unwrap_or(false)
    }

    /// Every occurrence in file-scan order, across all kinds.
    pub fn order(&self) -> &[OrderEntry] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Scan `lines` for annotations of the given `known` kinds.
///
/// Multiple arguments on one line become separate sequential entries in
/// both the bucket and the order record. Unknown `@words` are skipped.
pub fn extract(lines: &[String], known: &[AnnotationKind]) -> AnnotationSet {
    let mut set = AnnotationSet::default();

    for line in lines {
        let Some((kind, rest)) = match_line(line.trim(), known) else {
            continue;
        };

        if kind.is_flag() {
            set.flags.insert(kind, true);
            set.order.push(OrderEntry { kind, index: 0 });
            continue;
        }

        let bucket = set.arguments.entry(kind).or_default();
        for argument in rest.split_whitespace() {
            let index = bucket.len();
            bucket.push(argument.to_string());
            set.order.push(OrderEntry { kind, index });
        }
    }

    set
}

/// Find the first `@<word>` in a trimmed line and return its kind plus the
/// remainder of the line, if the word is one of the known kinds.
fn match_line<'a>(line: &'a str, known: &[AnnotationKind]) -> Option<(AnnotationKind, &'a str)> {
    let at = line.find('@')?;
    let after = &line[at + 1..];
    let word_len = after
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric())
        .map_or(after.len(), |(i, _)| i);
    let word = &after[..word_len];

    let kind = AnnotationKind::from_word(word)?;
    if !known.contains(&kind) {
        return None;
    }
    Some((kind, &after[word_len..]))
}
