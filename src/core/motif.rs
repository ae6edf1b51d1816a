//! Expansion of IUPAC ambiguity motifs into exact per-position matchers.
//!
//! Each motif character is looked up once in a fixed table, so classes never
//! interact with each other (a `U` inside an expanded class is never expanded again).

use crate::core::error::AnnotateError;

/// Set of literal characters accepted at one motif position.
///
/// Bases are stored uppercase; matching folds the candidate to uppercase first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseClass {
    code: u8,
    allowed: &'static [u8],
}

impl BaseClass {
    /// Look up the class for an ambiguity code (case-insensitive).
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        let allowed: &'static [u8] = match code {
            b'A' => b"A",
            b'T' => b"T",
            b'G' => b"G",
            b'C' => b"C",
            b'U' => b"UT",
            b'W' => b"ATU",
            b'S' => b"CG",
            b'M' => b"AC",
            b'K' => b"GTU",
            b'R' => b"AG",
            b'Y' => b"CTU",
            b'B' => b"CGT",
            b'D' => b"AGTU",
            b'H' => b"ACTU",
            b'V' => b"ACG",
            b'N' => b"ACGTU",
            b'Z' => b"-",
            _ => return None,
        };
        Some(Self { code, allowed })
    }

    /// The (uppercase) ambiguity code this class was built from
    #[must_use]
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Uppercase literals accepted by this class
    #[must_use]
    pub fn allowed(&self) -> &'static [u8] {
        self.allowed
    }

    #[inline]
    #[must_use]
    pub fn accepts(&self, base: u8) -> bool {
        self.allowed.contains(&base.to_ascii_uppercase())
    }
}

/// Compiled motif: one [`BaseClass`] per motif position.
///
/// Built once per motif with [`expand`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matcher {
    /// Motif text as supplied, kept for legend labels
    pattern: String,
    classes: Vec<BaseClass>,
}

impl Matcher {
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn classes(&self) -> &[BaseClass] {
        &self.classes
    }

    /// Number of positions; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Test the window of `sequence` starting at `start`.
    ///
    /// Returns `false` when the window would run past the end of the sequence.
    #[must_use]
    pub fn matches_at(&self, sequence: &[u8], start: usize) -> bool {
        match sequence.get(start..start.saturating_add(self.classes.len())) {
            Some(window) => self
                .classes
                .iter()
                .zip(window)
                .all(|(class, &base)| class.accepts(base)),
            None => false,
        }
    }

    /// Test whether `candidate` as a whole is one of the literals this motif denotes.
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        candidate.len() == self.classes.len() && self.matches_at(candidate.as_bytes(), 0)
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Expand a motif string into a [`Matcher`].
///
/// # Errors
///
/// Returns `AnnotateError::InvalidMotif` if the pattern is empty or contains a
/// character outside the ambiguity alphabet.
///
/// # Examples
///
/// ```
/// use motif_mark::core::motif::expand;
///
/// let matcher = expand("ygcy").unwrap();
/// assert!(matcher.is_match("TGCC"));
/// assert!(matcher.is_match("cgct"));
/// assert!(!matcher.is_match("AGCC"));
/// ```
pub fn expand(pattern: &str) -> Result<Matcher, AnnotateError> {
    if pattern.is_empty() {
        return Err(AnnotateError::invalid_motif(pattern, "motif is empty"));
    }

    let classes = pattern
        .chars()
        .enumerate()
        .map(|(i, c)| {
            u8::try_from(c)
                .ok()
                .and_then(BaseClass::from_code)
                .ok_or_else(|| {
                    AnnotateError::invalid_motif(
                        pattern,
                        format!("unsupported ambiguity code '{c}' at position {}", i + 1),
                    )
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Matcher {
        pattern: pattern.to_string(),
        classes,
    })
}
