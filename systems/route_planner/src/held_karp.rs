//! Exact ordering by dynamic programming over goal subsets.

use treasure_maze_core::RouteError;

use crate::{matrix::CostMatrix, Budget};

const UNSET: u32 = u32::MAX;

/// `best[mask * goals + last]` is the cheapest walk from the origin that
/// visits exactly the goals in `mask` and ends at `last`.
pub(crate) fn order(
    matrix: &CostMatrix,
    budget: &mut Budget,
) -> Result<(Vec<usize>, u32), RouteError> {
    let goals = matrix.goals();
    let masks = 1_usize << goals;
    let mut best = vec![UNSET; masks * goals];
    let mut parent = vec![usize::MAX; masks * goals];

    for goal in 0..goals {
        best[(1 << goal) * goals + goal] = matrix.from_start(goal);
    }

    for mask in 1..masks {
        for last in 0..goals {
            budget.tick()?;
            if mask & (1 << last) == 0 {
                continue;
            }
            let cost = best[mask * goals + last];
            if cost == UNSET {
                continue;
            }
            for next in 0..goals {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let grown = mask | (1 << next);
                let candidate = cost.saturating_add(matrix.between(last, next));
                let slot = grown * goals + next;
                if candidate < best[slot] {
                    best[slot] = candidate;
                    parent[slot] = last;
                }
            }
        }
    }

    let full = masks - 1;
    let mut last = 0;
    let mut cost = UNSET;
    for goal in 0..goals {
        let candidate = best[full * goals + goal];
        if candidate < cost {
            cost = candidate;
            last = goal;
        }
    }

    let mut order = Vec::with_capacity(goals);
    let mut mask = full;
    while mask != 0 {
        order.push(last);
        let previous = parent[mask * goals + last];
        mask &= !(1 << last);
        last = previous;
    }
    order.reverse();

    Ok((order, cost))
}
