//! Approximate ordering: nearest-neighbour construction refined by 2-opt.

use treasure_maze_core::RouteError;

use crate::{matrix::CostMatrix, Budget};

pub(crate) fn order(
    matrix: &CostMatrix,
    budget: &mut Budget,
) -> Result<(Vec<usize>, u32), RouteError> {
    let mut order = nearest_neighbor(matrix, budget)?;
    let mut cost = matrix.route_cost(&order);

    // Open-path 2-opt: reverse `order[i..=j]` while that strictly helps.
    let mut improved = true;
    while improved {
        improved = false;
        for i in 0..order.len() {
            for j in i + 1..order.len() {
                budget.tick()?;
                order[i..=j].reverse();
                let candidate = matrix.route_cost(&order);
                if candidate < cost {
                    cost = candidate;
                    improved = true;
                } else {
                    order[i..=j].reverse();
                }
            }
        }
    }

    Ok((order, cost))
}

fn nearest_neighbor(matrix: &CostMatrix, budget: &mut Budget) -> Result<Vec<usize>, RouteError> {
    let goals = matrix.goals();
    let mut visited = vec![false; goals];
    let mut order = Vec::with_capacity(goals);

    while order.len() < goals {
        let mut closest: Option<(usize, u32)> = None;
        for goal in 0..goals {
            budget.tick()?;
            if visited[goal] {
                continue;
            }
            let leg = match order.last() {
                Some(&previous) => matrix.between(previous, goal),
                None => matrix.from_start(goal),
            };
            if closest.map_or(true, |(_, cost)| leg < cost) {
                closest = Some((goal, leg));
            }
        }
        let Some((goal, _)) = closest else {
            break;
        };
        visited[goal] = true;
        order.push(goal);
    }

    Ok(order)
}
