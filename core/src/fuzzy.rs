//! Approximate title matching with the Ratcliff/Obershelp "gestalt" ratio.
//!
//! The ratio is `2 * M / (|a| + |b|)` where `M` counts the characters in matching
//! blocks: take the longest common block, then repeat on the pieces to its left and
//! right. For sequences of 200+ characters, characters that make up more than 1% of
//! the second sequence are "popular" and never start a block.

use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_MAX_MATCHES: usize = 3;
const AUTOJUNK_MIN_LEN: usize = 200;

/// Matcher with the second sequence fixed, reused against many first sequences.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    b: Vec<char>,
    // char -> ascending positions in `b`, popular chars removed
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= ntest);
        }
        Self { b, b2j }
    }

    /// Similarity of `a` against the fixed sequence, in [0, 1].
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let total = a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches = self.matching_chars(&a, 0, a.len(), 0, self.b.len());
        2.0 * matches as f64 / total as f64
    }

    /// Cheap upper bound on [`Self::ratio`] from the lengths alone.
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        let la = a.chars().count();
        let lb = self.b.len();
        if la + lb == 0 { 1.0 } else { 2.0 * la.min(lb) as f64 / (la + lb) as f64 }
    }

    fn matching_chars(&self, a: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
        let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
        if k == 0 {
            return 0;
        }
        let mut total = k;
        if alo < i && blo < j {
            total += self.matching_chars(a, alo, i, blo, j);
        }
        if i + k < ahi && j + k < bhi {
            total += self.matching_chars(a, i + k, ahi, j + k, bhi);
        }
        total
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given ranges; earliest `i`, then
    /// earliest `j`, wins among equally long blocks.
    fn longest_match(&self, a: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let b = &self.b;
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        // j -> length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo { continue; }
                    if j >= bhi { break; }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }
        // Popular characters cannot seed a block but may still extend one.
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi && bestj + bestsize < bhi && a[besti + bestsize] == b[bestj + bestsize] {
            bestsize += 1;
        }
        (besti, bestj, bestsize)
    }
}

/// Similarity ratio between two strings, in [0, 1].
pub fn ratio(a: &str, b: &str) -> f64 { SequenceMatcher::new(b).ratio(a) }

#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Position of the candidate in the input slice.
    pub index: usize,
    pub score: f64,
}

/// Candidates scoring at least `cutoff` against `query`, best first, at most `n`.
/// Equal scores put the lexically larger candidate first.
pub fn close_matches<S: AsRef<str>>(query: &str, candidates: &[S], n: usize, cutoff: f64) -> Vec<FuzzyMatch> {
    let matcher = SequenceMatcher::new(query);
    let mut results: Vec<FuzzyMatch> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| matcher.real_quick_ratio(c.as_ref()) >= cutoff)
        .filter_map(|(index, c)| {
            let score = matcher.ratio(c.as_ref());
            (score >= cutoff).then_some(FuzzyMatch { index, score })
        })
        .collect();
    let text = |m: &FuzzyMatch| -> &str { candidates[m.index].as_ref() };
    results.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| text(y).cmp(text(x)))
    });
    results.truncate(n);
    results
}
