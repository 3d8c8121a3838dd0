use std::collections::HashMap;

use px_core::frame::AsciiCell;

/// Couleur (R, G, B) la plus fréquente parmi les cellules opaques.
///
/// Les cellules d'alpha 0 sont ignorées. Les égalités sont tranchées par
/// ordre de première apparition, ce qui rend le résultat déterministe pour
/// un multiset de pixels donné.
///
/// Retourne `None` si toutes les cellules sont transparentes.
///
/// # Example
/// ```
/// use px_ascii::dominant::dominant_color;
/// use px_core::frame::AsciiCell;
///
/// let cells = vec![
///     AsciiCell { ch: '#', color: (10, 20, 30, 255) },
///     AsciiCell { ch: '#', color: (10, 20, 30, 255) },
///     AsciiCell { ch: '.', color: (200, 200, 200, 255) },
/// ];
/// assert_eq!(dominant_color(&cells), Some((10, 20, 30)));
/// ```
#[must_use]
pub fn dominant_color(cells: &[AsciiCell]) -> Option<(u8, u8, u8)> {
    // (first-seen rank, count) par triplet RGB.
    let mut tally: HashMap<(u8, u8, u8), (usize, u32)> = HashMap::new();

    for cell in cells {
        let (r, g, b, a) = cell.color;
        if a == 0 {
            continue;
        }
        let rank = tally.len();
        let entry = tally.entry((r, g, b)).or_insert((rank, 0));
        entry.1 += 1;
    }

    tally
        .into_iter()
        .max_by(|(_, (rank_a, count_a)), (_, (rank_b, count_b))| {
            count_a.cmp(count_b).then(rank_b.cmp(rank_a))
        })
        .map(|(color, _)| color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(color: (u8, u8, u8, u8)) -> AsciiCell {
        AsciiCell { ch: '#', color }
    }

    #[test]
    fn most_frequent_wins() {
        let cells = vec![
            cell((1, 1, 1, 255)),
            cell((2, 2, 2, 255)),
            cell((2, 2, 2, 255)),
        ];
        assert_eq!(dominant_color(&cells), Some((2, 2, 2)));
    }

    #[test]
    fn transparent_cells_are_excluded() {
        let cells = vec![
            cell((9, 9, 9, 0)),
            cell((9, 9, 9, 0)),
            cell((5, 5, 5, 255)),
        ];
        assert_eq!(dominant_color(&cells), Some((5, 5, 5)));
    }

    #[test]
    fn all_transparent_is_none() {
        let cells = vec![cell((255, 255, 255, 0)); 4];
        assert_eq!(dominant_color(&cells), None);
    }

    #[test]
    fn tie_breaks_on_first_encountered() {
        let cells = vec![
            cell((7, 7, 7, 255)),
            cell((3, 3, 3, 255)),
            cell((3, 3, 3, 255)),
            cell((7, 7, 7, 255)),
        ];
        assert_eq!(dominant_color(&cells), Some((7, 7, 7)));
    }

    #[test]
    fn deterministic_over_repeated_calls() {
        let cells: Vec<AsciiCell> = (0u8..100)
            .map(|i| cell((i % 7, i % 5, i % 3, 255)))
            .collect();
        let first = dominant_color(&cells);
        for _ in 0..10 {
            assert_eq!(dominant_color(&cells), first);
        }
    }

    #[test]
    fn empty_slice_is_none() {
        assert_eq!(dominant_color(&[]), None);
    }
}
