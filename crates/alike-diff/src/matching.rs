//! Assignment strategies for pairing unordered elements.
//!
//! Both strategies take a score matrix where `scores[i][j]` is the cost of
//! pairing expected element `i` with actual element `j` (0 for an exact
//! match) and return matched `(expected, actual)` pairs sorted by expected
//! index. Every strategy matches `min(n, m)` pairs.

use tracing::debug;

use crate::config::MatchStrategy;

/// Pair elements using `strategy`.
pub fn assign(strategy: MatchStrategy, scores: &[Vec<usize>]) -> Vec<(usize, usize)> {
    match strategy {
        MatchStrategy::Greedy => greedy(scores),
        MatchStrategy::Optimal { max_len } => {
            let (n, m) = (scores.len(), width(scores));
            if n.max(m) <= max_len {
                optimal(scores)
            } else {
                debug!(
                    expected_len = n,
                    actual_len = m,
                    max_len,
                    "collection too large for optimal matching; falling back to greedy"
                );
                greedy(scores)
            }
        }
    }
}

/// Take pairs in ascending `(score, expected, actual)` order, skipping any
/// pair whose expected or actual element is already taken.
pub fn greedy(scores: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let (n, m) = (scores.len(), width(scores));
    let mut candidates: Vec<(usize, usize, usize)> = scores
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, &s)| (s, i, j)))
        .collect();
    candidates.sort_unstable();

    let mut expected_taken = vec![false; n];
    let mut actual_taken = vec![false; m];
    let mut pairs = Vec::with_capacity(n.min(m));
    for (_, i, j) in candidates {
        if expected_taken[i] || actual_taken[j] {
            continue;
        }
        expected_taken[i] = true;
        actual_taken[j] = true;
        pairs.push((i, j));
        if pairs.len() == n.min(m) {
            break;
        }
    }
    pairs.sort_unstable();
    pairs
}

/// Minimum-total-score assignment (Hungarian method, `O(n² m)`).
pub fn optimal(scores: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let (n, m) = (scores.len(), width(scores));
    if n == 0 || m == 0 {
        return Vec::new();
    }
    if n > m {
        let transposed: Vec<Vec<usize>> = (0..m)
            .map(|j| scores.iter().map(|row| row[j]).collect())
            .collect();
        let mut pairs: Vec<(usize, usize)> =
            optimal(&transposed).into_iter().map(|(j, i)| (i, j)).collect();
        pairs.sort_unstable();
        return pairs;
    }

    // 1-based potentials; column 0 is the virtual start. Costs are capped so
    // that no potential can exceed `inf`.
    let inf = i64::MAX / 4;
    let cap = inf / (m as i64 + 1);
    let cost = |i: usize, j: usize| i64::try_from(scores[i - 1][j - 1]).unwrap_or(cap).min(cap);
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut owner = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        owner[0] = i;
        let mut j0 = 0;
        let mut min_v = vec![inf; m + 1];
        let mut used = vec![false; m + 1];
        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = inf;
            let mut j1 = 0;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let reduced = cost(i0, j) - u[i0] - v[j];
                if reduced < min_v[j] {
                    min_v[j] = reduced;
                    way[j] = j0;
                }
                if min_v[j] < delta {
                    delta = min_v[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_v[j] -= delta;
                }
            }
            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }
        while j0 != 0 {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
        }
    }

    let mut pairs: Vec<(usize, usize)> = (1..=m)
        .filter(|&j| owner[j] != 0)
        .map(|j| (owner[j] - 1, j - 1))
        .collect();
    pairs.sort_unstable();
    pairs
}

fn width(scores: &[Vec<usize>]) -> usize {
    scores.first().map_or(0, Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(scores: &[Vec<usize>], pairs: &[(usize, usize)]) -> usize {
        pairs.iter().map(|&(i, j)| scores[i][j]).sum()
    }

    #[test]
    fn greedy_and_optimal_can_disagree() {
        let scores = vec![vec![1, 2], vec![2, 100]];
        let g = greedy(&scores);
        let o = optimal(&scores);
        assert_eq!(g, vec![(0, 0), (1, 1)]);
        assert_eq!(o, vec![(0, 1), (1, 0)]);
        assert_eq!(total(&scores, &g), 101);
        assert_eq!(total(&scores, &o), 4);
    }

    #[test]
    fn greedy_breaks_ties_by_index() {
        let scores = vec![vec![0, 0], vec![0, 0]];
        assert_eq!(greedy(&scores), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn rectangular_matrices() {
        let wide = vec![vec![5, 0, 3]];
        assert_eq!(greedy(&wide), vec![(0, 1)]);
        assert_eq!(optimal(&wide), vec![(0, 1)]);

        let tall = vec![vec![4], vec![1], vec![7]];
        assert_eq!(greedy(&tall), vec![(1, 0)]);
        assert_eq!(optimal(&tall), vec![(1, 0)]);

        assert!(optimal(&[]).is_empty());
        assert!(greedy(&[vec![], vec![]]).is_empty());
    }

    #[test]
    fn optimal_beats_or_ties_greedy() {
        let scores = vec![
            vec![3, 1, 4, 1],
            vec![5, 9, 2, 6],
            vec![5, 3, 5, 8],
            vec![9, 7, 9, 3],
        ];
        let o = optimal(&scores);
        assert_eq!(o.len(), 4);
        assert!(total(&scores, &o) <= total(&scores, &greedy(&scores)));
        assert_eq!(total(&scores, &o), 11);
    }

    #[test]
    fn optimal_handles_saturated_scores() {
        let max = usize::MAX;
        let scores = vec![vec![max, 0, max], vec![0, max, max], vec![max, max, 1]];
        assert_eq!(optimal(&scores), vec![(0, 1), (1, 0), (2, 2)]);

        let flat = vec![vec![max; 3]; 2];
        assert_eq!(optimal(&flat).len(), 2);
        assert_eq!(greedy(&flat), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn strategy_falls_back_to_greedy_above_limit() {
        let scores = vec![vec![1, 2], vec![2, 100]];
        assert_eq!(
            assign(MatchStrategy::Optimal { max_len: 1 }, &scores),
            greedy(&scores)
        );
        assert_eq!(
            assign(MatchStrategy::Optimal { max_len: 2 }, &scores),
            optimal(&scores)
        );
    }
}
