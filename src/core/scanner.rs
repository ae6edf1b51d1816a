//! Exhaustive motif occurrence search.
//!
//! After a hit starting at `s` the scan resumes at `s + 1`, so overlapping hits
//! are all reported: `AA` in `AAA` yields `[0, 2)` and `[1, 3)`.

use crate::core::motif::Matcher;
use crate::core::types::Interval;

/// Lazy iterator over the occurrences of a [`Matcher`] in a sequence.
///
/// A clone resumes from the same scan position; call [`find_all`] again to restart.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    matcher: &'a Matcher,
    sequence: &'a [u8],
    next_start: usize,
}

impl Iterator for Occurrences<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.matcher.len();
        if width == 0 {
            return None;
        }

        while self.next_start + width <= self.sequence.len() {
            let start = self.next_start;
            self.next_start += 1;
            if self.matcher.matches_at(self.sequence, start) {
                return Some(Interval::new(start, start + width));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining =
            (self.sequence.len() + 1).saturating_sub(self.next_start + self.matcher.len());
        (0, Some(remaining))
    }
}

impl std::iter::FusedIterator for Occurrences<'_> {}

/// Find every occurrence of `matcher` in `sequence`, overlaps included.
///
/// Intervals are yielded in increasing start order. An empty sequence, or one
/// shorter than the motif, yields nothing.
///
/// # Examples
///
/// ```
/// use motif_mark::core::motif::expand;
/// use motif_mark::core::scanner::find_all;
///
/// let matcher = expand("AA").unwrap();
/// let starts: Vec<usize> = find_all(&matcher, "AAAA").map(|iv| iv.start).collect();
/// assert_eq!(starts, vec![0, 1, 2]);
/// ```
#[must_use]
pub fn find_all<'a>(matcher: &'a Matcher, sequence: &'a str) -> Occurrences<'a> {
    Occurrences {
        matcher,
        sequence: sequence.as_bytes(),
        next_start: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::motif::expand;

    fn spans(motif: &str, sequence: &str) -> Vec<(usize, usize)> {
        let matcher = expand(motif).unwrap();
        find_all(&matcher, sequence)
            .map(|iv| (iv.start, iv.end))
            .collect()
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(spans("AA", "AAAA"), vec![(0, 2), (1, 3), (2, 4)]);
        assert_eq!(spans("AA", "AAA"), vec![(0, 2), (1, 3)]);
        assert_eq!(spans("ATA", "ATATA"), vec![(0, 3), (2, 5)]);
    }

    #[test]
    fn test_empty_sequence() {
        for motif in ["A", "YGCY", "NNNNNNNN"] {
            assert!(spans(motif, "").is_empty());
        }
    }

    #[test]
    fn test_motif_longer_than_sequence() {
        assert!(spans("GATCGATC", "GATC").is_empty());
    }

    #[test]
    fn test_single_letter_motif() {
        assert_eq!(spans("C", "aCgc"), vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn test_case_insensitive_scan() {
        assert_eq!(
            spans("YGCY", "ttgcatGCTTcgct"),
            vec![(5, 9), (10, 14)]
        );
    }

    #[test]
    fn test_ambiguous_motif_across_exon_boundary() {
        // Motifs are matched regardless of exon/intron case changes
        assert_eq!(spans("GCAUG", "ttgcATGcc"), vec![(2, 7)]);
    }

    #[test]
    fn test_intervals_have_motif_width() {
        let matcher = expand("NNN").unwrap();
        let hits: Vec<Interval> = find_all(&matcher, "ACGTAC").collect();
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|iv| iv.len() == 3));
    }

    #[test]
    fn test_rescan_yields_same_hits() {
        let matcher = expand("CG").unwrap();
        let first: Vec<Interval> = find_all(&matcher, "CGCGCG").collect();
        let second: Vec<Interval> = find_all(&matcher, "CGCGCG").collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_size_hint_upper_bound() {
        let matcher = expand("AA").unwrap();
        let iter = find_all(&matcher, "AAAA");
        assert_eq!(iter.size_hint(), (0, Some(3)));
        assert_eq!(find_all(&matcher, "A").size_hint(), (0, Some(0)));
    }
}
