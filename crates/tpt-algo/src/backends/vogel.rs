//! Vogel's approximation method for an initial basic feasible solution.
//!
//! Each step allocates to one cell and crosses out exactly one line (row or
//! column), except the final step which closes both. The allocated cells,
//! zero allocations included, therefore form a spanning tree of the
//! `rows + cols` line graph: a valid transportation basis with
//! `rows + cols - 1` cells.

/// Allocated flows and basis flags of an initial solution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InitialBasis {
    pub flow: Vec<Vec<f64>>,
    pub basic: Vec<Vec<bool>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    Row(usize),
    Col(usize),
}

/// Build the initial basis for a balanced (or supply-surplus) tableau.
///
/// Ties are broken deterministically: larger penalty first, rows before
/// columns, then lower index; within the chosen line the cheapest cell with
/// the lowest index wins.
pub(crate) fn initial_basis(supply: &[f64], demand: &[f64], cost: &[Vec<f64>]) -> InitialBasis {
    let m = supply.len();
    let n = demand.len();
    let mut flow = vec![vec![0.0; n]; m];
    let mut basic = vec![vec![false; n]; m];

    let mut s = supply.to_vec();
    let mut d = demand.to_vec();
    let mut row_open = vec![true; m];
    let mut col_open = vec![true; n];
    let mut rows_left = m;
    let mut cols_left = n;

    while rows_left > 0 && cols_left > 0 {
        let (i, j) = select_cell(cost, &row_open, &col_open);

        let x = s[i].min(d[j]);
        flow[i][j] = x;
        basic[i][j] = true;
        s[i] -= x;
        d[j] -= x;

        if rows_left == 1 && cols_left == 1 {
            break;
        }

        let close_row = if rows_left == 1 {
            false
        } else if cols_left == 1 {
            true
        } else {
            s[i] <= d[j]
        };

        if close_row {
            row_open[i] = false;
            rows_left -= 1;
        } else {
            col_open[j] = false;
            cols_left -= 1;
        }
    }

    InitialBasis { flow, basic }
}

fn select_cell(cost: &[Vec<f64>], row_open: &[bool], col_open: &[bool]) -> (usize, usize) {
    let mut best: Option<(f64, Line)> = None;

    for i in (0..row_open.len()).filter(|&i| row_open[i]) {
        let penalty = penalty((0..col_open.len()).filter(|&j| col_open[j]).map(|j| cost[i][j]));
        if best.map_or(true, |(p, _)| penalty > p) {
            best = Some((penalty, Line::Row(i)));
        }
    }
    for j in (0..col_open.len()).filter(|&j| col_open[j]) {
        let penalty = penalty((0..row_open.len()).filter(|&i| row_open[i]).map(|i| cost[i][j]));
        if best.map_or(true, |(p, _)| penalty > p) {
            best = Some((penalty, Line::Col(j)));
        }
    }

    match best.map(|(_, line)| line) {
        Some(Line::Row(i)) => (i, cheapest(col_open, |j| cost[i][j])),
        Some(Line::Col(j)) => (cheapest(row_open, |i| cost[i][j]), j),
        // The caller only asks while both a row and a column are open.
        None => (0, 0),
    }
}

/// Difference between the two smallest costs; the cost itself when the line
/// has a single open cell.
fn penalty(costs: impl Iterator<Item = f64>) -> f64 {
    let mut lowest = f64::INFINITY;
    let mut second = f64::INFINITY;
    for c in costs {
        if c < lowest {
            second = lowest;
            lowest = c;
        } else if c < second {
            second = c;
        }
    }
    if second.is_finite() {
        second - lowest
    } else {
        lowest
    }
}

fn cheapest(open: &[bool], cost_of: impl Fn(usize) -> f64) -> usize {
    let mut best: Option<(f64, usize)> = None;
    for k in (0..open.len()).filter(|&k| open[k]) {
        let c = cost_of(k);
        if best.map_or(true, |(b, _)| c < b) {
            best = Some((c, k));
        }
    }
    best.map_or(0, |(_, k)| k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_count(basis: &InitialBasis) -> usize {
        basis.basic.iter().flatten().filter(|&&b| b).count()
    }

    #[test]
    fn test_penalty() {
        assert_eq!(penalty([8.0, 6.0].into_iter()), 2.0);
        assert_eq!(penalty([3.0, 1.0, 2.0].into_iter()), 1.0);
        assert_eq!(penalty([4.0].into_iter()), 4.0);
        assert_eq!(penalty([5.0, 5.0].into_iter()), 0.0);
    }

    #[test]
    fn test_two_by_two() {
        let basis = initial_basis(
            &[20.0, 30.0],
            &[25.0, 25.0],
            &[vec![8.0, 6.0], vec![9.0, 5.0]],
        );
        assert_eq!(basis.flow, vec![vec![20.0, 0.0], vec![5.0, 25.0]]);
        assert_eq!(basic_count(&basis), 3);
    }

    #[test]
    fn test_degenerate_tie_keeps_full_basis() {
        let basis = initial_basis(&[5.0, 5.0], &[5.0, 5.0], &[vec![0.0, 0.0], vec![0.0, 0.0]]);
        assert_eq!(basic_count(&basis), 3);
        assert_eq!(basis.flow, vec![vec![5.0, 0.0], vec![0.0, 5.0]]);
    }

    #[test]
    fn test_single_cell() {
        let basis = initial_basis(&[7.0], &[7.0], &[vec![3.0]]);
        assert_eq!(basis.flow, vec![vec![7.0]]);
        assert_eq!(basic_count(&basis), 1);
    }

    #[test]
    fn test_column_sums_match_demand() {
        let supply = [15.0, 25.0, 10.0];
        let demand = [5.0, 15.0, 15.0, 15.0];
        let cost = vec![
            vec![10.0, 2.0, 20.0, 11.0],
            vec![12.0, 7.0, 9.0, 20.0],
            vec![4.0, 14.0, 16.0, 18.0],
        ];
        let basis = initial_basis(&supply, &demand, &cost);
        assert_eq!(basic_count(&basis), 6);
        for (j, &need) in demand.iter().enumerate() {
            let got: f64 = basis.flow.iter().map(|row| row[j]).sum();
            assert!((got - need).abs() < 1e-9);
        }
        for (i, &cap) in supply.iter().enumerate() {
            assert!(basis.flow[i].iter().sum::<f64>() <= cap + 1e-9);
        }
    }
}
