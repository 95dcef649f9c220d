//! Minimal edit scripts between two sequences.
//!
//! [`diff`] explains how `new` differs from `old` as a list of [`Change`]s.
//! Elements that belong to the longest common subsequence get no change at
//! all; everything else is either removed from `old` or inserted into `new`. A
//! move is a removal and an insertion of the same element.
//!
//! Scripts follow classic patch semantics. All removals come first, in
//! descending offset order, so every removal offset is also the element's
//! offset in the original `old`. Insertions follow in ascending offset order,
//! each landing at its final offset in `new`.
//!
//! ```
//! use reorder::diff::{Change, diff};
//!
//! let script = diff(&["a", "b", "c"], &["b", "a", "c"]);
//! assert_eq!(
//!     script.changes(),
//!     &[
//!         Change::Remove { offset: 1, item: "b" },
//!         Change::Insert { offset: 0, item: "b" },
//!     ]
//! );
//! assert_eq!(script.apply(&["a", "b", "c"]), vec!["b", "a", "c"]);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One step of an [`EditScript`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change<T> {
    /// Remove `item`, found at `offset` of the sequence being patched.
    Remove { offset: usize, item: T },
    /// Insert `item` so that it ends up at `offset`.
    Insert { offset: usize, item: T },
}

impl<T> Change<T> {
    /// Offset the change applies to.
    pub fn offset(&self) -> usize {
        match self {
            Change::Remove { offset, .. } | Change::Insert { offset, .. } => *offset,
        }
    }

    /// Element carried by the change.
    pub fn item(&self) -> &T {
        match self {
            Change::Remove { item, .. } | Change::Insert { item, .. } => item,
        }
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, Change::Remove { .. })
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Change::Insert { .. })
    }
}

/// Ordered list of changes turning one sequence into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript<T> {
    changes: Vec<Change<T>>,
}

impl<T> EditScript<T> {
    /// True when the two sequences were identical.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[Change<T>] {
        &self.changes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change<T>> {
        self.changes.iter()
    }

    /// Removals in script order.
    pub fn removals(&self) -> impl Iterator<Item = &Change<T>> {
        self.changes.iter().filter(|c| c.is_remove())
    }

    /// Insertions in script order.
    pub fn insertions(&self) -> impl Iterator<Item = &Change<T>> {
        self.changes.iter().filter(|c| c.is_insert())
    }

    /// Converts each carried element, keeping offsets.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> EditScript<U> {
        let changes = self
            .changes
            .into_iter()
            .map(|change| match change {
                Change::Remove { offset, item } => Change::Remove {
                    offset,
                    item: f(item),
                },
                Change::Insert { offset, item } => Change::Insert {
                    offset,
                    item: f(item),
                },
            })
            .collect();
        EditScript { changes }
    }
}

impl<T: Clone> EditScript<T> {
    /// Replays the script against `old`.
    ///
    /// Applied to the `old` it was computed from, this returns `new`.
    ///
    /// # Panics
    /// Panics if an offset falls outside the sequence being patched, which
    /// only happens when the script is applied to a different sequence.
    pub fn apply(&self, old: &[T]) -> Vec<T> {
        let mut result = old.to_vec();
        for change in &self.changes {
            match change {
                Change::Remove { offset, .. } => {
                    result.remove(*offset);
                }
                Change::Insert { offset, item } => result.insert(*offset, item.clone()),
            }
        }
        result
    }
}

impl<T: Eq + Hash> EditScript<T> {
    /// Elements that are both removed and inserted, i.e. moved.
    pub fn moved_items(&self) -> Vec<&T> {
        let removed: HashSet<&T> = self.removals().map(Change::item).collect();
        self.insertions()
            .map(Change::item)
            .filter(|item| removed.contains(item))
            .collect()
    }
}

impl<T> Default for EditScript<T> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a EditScript<T> {
    type Item = &'a Change<T>;
    type IntoIter = std::slice::Iter<'a, Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl<T> IntoIterator for EditScript<T> {
    type Item = Change<T>;
    type IntoIter = std::vec::IntoIter<Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Computes a minimal edit script from `old` to `new`.
///
/// Among equally short scripts the one keeping the earliest elements of `old`
/// in place is chosen, so the result is fully determined by the inputs.
///
/// The common prefix is matched directly. The rest runs a backward greedy
/// search (Myers) from the end of both sequences, which also consumes the
/// common suffix in one pass. The search takes O((N + M) * D) time and
/// O(D^2) space for a script of D changes, so a single move in a large
/// collection stays linear.
pub fn diff<T: Eq + Clone>(old: &[T], new: &[T]) -> EditScript<T> {
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let old_rest = &old[prefix..];
    let new_rest = &new[prefix..];

    let frontiers = Frontiers::search(old_rest, new_rest);
    let mut remaining = frontiers.distance();

    let mut removed = Vec::new();
    let mut inserted = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < old_rest.len() || j < new_rest.len() {
        if i < old_rest.len() && j < new_rest.len() && old_rest[i] == new_rest[j] {
            i += 1;
            j += 1;
            continue;
        }

        // The walk stays on a shortest path, so at least one change is left
        remaining -= 1;
        if j < new_rest.len()
            && (i == old_rest.len() || frontiers.reaches_end(remaining, i, j + 1))
        {
            // Skipping new[j] first keeps old[i] available for a later match
            inserted.push(Change::Insert {
                offset: prefix + j,
                item: new_rest[j].clone(),
            });
            j += 1;
        } else {
            removed.push(Change::Remove {
                offset: prefix + i,
                item: old_rest[i].clone(),
            });
            i += 1;
        }
    }

    removed.reverse();
    removed.extend(inserted);
    EditScript { changes: removed }
}

/// Furthest-reaching paths of a backward greedy search.
///
/// Position `x` on diagonal `k` means `x` trailing elements of `old` and
/// `x - k` trailing elements of `new` are consumed. `rows[d]` holds, for the
/// diagonals `-d, -d + 2, ..., d`, the furthest `x` reachable from the end
/// with `d` changes.
struct Frontiers {
    old_len: usize,
    new_len: usize,
    rows: Vec<Vec<usize>>,
}

impl Frontiers {
    fn search<T: Eq>(old: &[T], new: &[T]) -> Self {
        let (n, m) = (old.len(), new.len());
        let target = n as isize - m as isize;
        let mut rows: Vec<Vec<usize>> = Vec::new();

        for d in 0..=n + m {
            let mut row = Vec::with_capacity(d + 1);
            for step in 0..=d {
                let k = 2 * step as isize - d as isize;
                // prev[step] is diagonal k + 1, prev[step - 1] is diagonal k - 1
                let mut x = match rows.last() {
                    None => 0,
                    Some(prev) if step == 0 || (step != d && prev[step - 1] < prev[step]) => {
                        prev[step]
                    }
                    Some(prev) => prev[step - 1] + 1,
                };
                let mut y = x as isize - k;
                while x < n
                    && y >= 0
                    && (y as usize) < m
                    && old[n - 1 - x] == new[m - 1 - y as usize]
                {
                    x += 1;
                    y += 1;
                }
                row.push(x);
            }

            let done = Self::index(d, target).is_some_and(|at| row[at] >= n);
            rows.push(row);
            if done {
                break;
            }
        }

        Self {
            old_len: n,
            new_len: m,
            rows,
        }
    }

    /// Length of the shortest script.
    fn distance(&self) -> usize {
        self.rows.len() - 1
    }

    /// Whether `old[i..]` can be turned into `new[j..]` with `budget` changes.
    fn reaches_end(&self, budget: usize, i: usize, j: usize) -> bool {
        let x = self.old_len - i;
        let k = x as isize - (self.new_len - j) as isize;
        Self::index(budget, k).is_some_and(|at| x <= self.rows[budget][at])
    }

    /// Slot of diagonal `k` in row `d`, if a `d`-change path can end on it.
    fn index(d: usize, k: isize) -> Option<usize> {
        let d = d as isize;
        (k.abs() <= d && (k + d) % 2 == 0).then(|| ((k + d) / 2) as usize)
    }
}
