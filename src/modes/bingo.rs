//! Bingo card generator.

use rand::Rng;
use rand::seq::SliceRandom;

use super::non_empty_lines;
use crate::error::{AppError, Result};

pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 7;

/// A square card; `None` marks the free center of odd-sized cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoCard {
    pub size: usize,
    cells: Vec<Option<String>>,
}

impl BingoCard {
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells[row * self.size + col].as_deref()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.cells.chunks(self.size)
    }

    fn has_free_center(size: usize) -> bool {
        size % 2 == 1
    }
}

/// Distinct items in first-seen order.
pub fn parse_items(data: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for line in non_empty_lines(data) {
        if !items.iter().any(|i| i == line) {
            items.push(line.to_string());
        }
    }
    items
}

/// Number of items a card of `size` needs.
pub fn items_needed(size: usize) -> usize {
    size * size - usize::from(BingoCard::has_free_center(size))
}

/// Shuffle `items` into a new card.
pub fn generate<R: Rng + ?Sized>(items: &[String], size: usize, rng: &mut R) -> Result<BingoCard> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(AppError::validation(format!(
            "Grid size must be between {MIN_SIZE} and {MAX_SIZE}"
        )));
    }
    let needed = items_needed(size);
    if items.len() < needed {
        return Err(AppError::validation(format!(
            "A {size}x{size} card needs {needed} distinct items, got {}",
            items.len()
        )));
    }

    let mut pool = items.to_vec();
    pool.shuffle(rng);
    pool.truncate(needed);

    let center = size * size / 2;
    let mut drawn = pool.into_iter();
    let cells = (0..size * size)
        .map(|idx| {
            if BingoCard::has_free_center(size) && idx == center {
                None
            } else {
                drawn.next()
            }
        })
        .collect();

    Ok(BingoCard { size, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn items(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("item {i}")).collect()
    }

    #[test]
    fn test_parse_items_dedups() {
        assert_eq!(parse_items("a\n b\na\n\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_odd_card_has_free_center() {
        let mut rng = StdRng::seed_from_u64(7);
        let card = generate(&items(24), 5, &mut rng).unwrap();

        assert_eq!(card.rows().count(), 5);
        assert!(card.cell(2, 2).is_none());

        let filled: HashSet<_> = (0..5)
            .flat_map(|r| (0..5).map(move |c| (r, c)))
            .filter_map(|(r, c)| card.cell(r, c))
            .collect();
        assert_eq!(filled.len(), 24);
    }

    #[test]
    fn test_even_card_is_full() {
        let mut rng = StdRng::seed_from_u64(1);
        let card = generate(&items(20), 4, &mut rng).unwrap();
        assert!(card.rows().flatten().all(Option::is_some));
    }

    #[test]
    fn test_not_enough_items() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate(&items(7), 3, &mut rng).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(generate(&items(8), 3, &mut rng).is_ok());
    }

    #[test]
    fn test_size_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(&items(100), 2, &mut rng).is_err());
        assert!(generate(&items(100), 8, &mut rng).is_err());
    }
}
