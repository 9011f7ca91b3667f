//! Exact ordering by enumerating every permutation.
//!
//! Permutations are visited in lexicographic order of goal indices, the same
//! order a textbook permutation generator yields for the input sequence, and
//! only a strictly cheaper total replaces the incumbent. Branches whose partial
//! cost already reaches the incumbent are skipped; with non-negative leg costs
//! they cannot produce a strictly cheaper order, so the first cheapest
//! permutation in enumeration order is still the one returned.

use treasure_maze_core::RouteError;

use crate::{matrix::CostMatrix, Budget};

pub(crate) fn order(
    matrix: &CostMatrix,
    budget: &mut Budget,
) -> Result<(Vec<usize>, u32), RouteError> {
    let goals = matrix.goals();
    let mut search = Search {
        matrix,
        budget,
        used: vec![false; goals],
        prefix: Vec::with_capacity(goals),
        best: None,
    };
    search.extend(0)?;

    Ok(search.best.unwrap_or_default())
}

struct Search<'a> {
    matrix: &'a CostMatrix,
    budget: &'a mut Budget,
    used: Vec<bool>,
    prefix: Vec<usize>,
    best: Option<(Vec<usize>, u32)>,
}

impl Search<'_> {
    fn extend(&mut self, cost: u32) -> Result<(), RouteError> {
        self.budget.tick()?;

        if self.prefix.len() == self.used.len() {
            let improves = self.best.as_ref().map_or(true, |(_, best)| cost < *best);
            if improves {
                self.best = Some((self.prefix.clone(), cost));
            }
            return Ok(());
        }

        for next in 0..self.used.len() {
            if self.used[next] {
                continue;
            }

            let leg = match self.prefix.last() {
                Some(&previous) => self.matrix.between(previous, next),
                None => self.matrix.from_start(next),
            };
            let extended = cost.saturating_add(leg);
            if let Some((_, best)) = &self.best {
                if extended >= *best {
                    continue;
                }
            }

            self.used[next] = true;
            self.prefix.push(next);
            let outcome = self.extend(extended);
            let _ = self.prefix.pop();
            self.used[next] = false;
            outcome?;
        }

        Ok(())
    }
}
