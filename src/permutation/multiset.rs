use std::collections::BTreeMap;
use std::iter;

/// Lazily yields every distinct ordering of a multiset exactly once.
///
/// The walk is an explicit depth-first stack over the distinct values and their
/// remaining occurrence counts. Descending into a branch takes one occurrence,
/// backtracking hands it back, so only distinct orderings are ever visited and
/// the cost tracks the multinomial coefficient instead of `n!`.
///
/// The partial-arrangement buffers belong to a single enumeration. Start a new
/// one for every multiset; clones made mid-walk carry their own copy of the
/// stack and continue independently.
#[derive(Debug, Clone)]
pub struct MultisetPermutations<T> {
    values: Vec<T>,
    remaining: Vec<usize>,
    // index into `values` picked at each depth
    chosen: Vec<usize>,
    // next candidate index to try at each depth
    cursor: Vec<usize>,
    len: usize,
    exhausted: bool,
}

impl<T: Ord + Clone> MultisetPermutations<T> {
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut occurrences: BTreeMap<T, usize> = BTreeMap::new();
        for element in elements {
            *occurrences.entry(element).or_insert(0) += 1;
        }
        let len: usize = occurrences.values().sum();
        let (values, remaining): (Vec<T>, Vec<usize>) = occurrences.into_iter().unzip();

        MultisetPermutations {
            values,
            remaining,
            chosen: Vec::with_capacity(len),
            cursor: vec![0; len],
            len,
            exhausted: false,
        }
    }
}

impl<T> MultisetPermutations<T> {
    /// Length of every arrangement this enumeration yields.
    pub fn arrangement_len(&self) -> usize {
        self.len
    }

    fn backtrack(&mut self) {
        if let Some(index) = self.chosen.pop() {
            self.remaining[index] += 1;
        }
    }

    fn step_back_or_finish(&mut self) {
        if self.chosen.is_empty() {
            self.exhausted = true;
        } else {
            self.backtrack();
        }
    }
}

impl<T: Clone> Iterator for MultisetPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        while !self.exhausted {
            let depth = self.chosen.len();
            if depth == self.len {
                let arrangement = self
                    .chosen
                    .iter()
                    .map(|&index| self.values[index].clone())
                    .collect();
                self.step_back_or_finish();
                return Some(arrangement);
            }

            let start = self.cursor[depth];
            match (start..self.values.len()).find(|&index| self.remaining[index] > 0) {
                Some(index) => {
                    self.remaining[index] -= 1;
                    self.chosen.push(index);
                    self.cursor[depth] = index + 1;
                    if depth + 1 < self.len {
                        self.cursor[depth + 1] = 0;
                    }
                }
                None => self.step_back_or_finish(),
            }
        }
        None
    }
}

/// All distinct placements of `n_a` ones (sample A) and `n_b` zeros (sample B).
pub fn arrangements(n_a: usize, n_b: usize) -> MultisetPermutations<u8> {
    MultisetPermutations::new(
        iter::repeat(1u8)
            .take(n_a)
            .chain(iter::repeat(0u8).take(n_b)),
    )
}

/// C(n, k), computed incrementally so every intermediate stays an exact integer.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u64, |acc, i| acc * (n - i) / (i + 1))
}
