//! Position-key helpers for ordered sibling lists.
//!
//! Sibling order is derived solely from a numeric position key (`y` for
//! fields, `presentation_order` for options and steps). New items are
//! appended with the next free key so existing siblings never get
//! renumbered; adjacent moves swap the keys of exactly two items.

/// Anything ordered by a numeric position key
pub trait Positioned {
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

/// Direction of an adjacent move within a sibling list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Next free position key for appending to `list`: max existing + 1, or 0
/// for an empty list
pub fn next_position<T: Positioned>(list: &[T]) -> i64 {
    list.iter()
        .map(Positioned::position)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

/// Swap the position keys (and slots) of the item at `index` and its
/// neighbor in `direction`. The list is expected to be in position order.
///
/// Returns the index of the affected neighbor, or `None` at either
/// boundary (first element cannot move up, last cannot move down), in
/// which case the list is unchanged. Both swapped items must be persisted
/// afterwards; a partial write shows up as duplicate position keys on
/// reload (see [`has_duplicate_positions`]).
pub fn reorder_adjacent<T: Positioned>(
    list: &mut [T],
    index: usize,
    direction: MoveDirection,
) -> Option<usize> {
    let neighbor = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => {
            if index + 1 >= list.len() {
                return None;
            }
            index + 1
        }
    };

    let a = list[index].position();
    let b = list[neighbor].position();
    list[index].set_position(b);
    list[neighbor].set_position(a);
    list.swap(index, neighbor);

    Some(neighbor)
}

/// Renumber `list` to consecutive keys 0..n in its current order. Applied
/// to option lists before a field save so the persisted order is dense.
pub fn assign_unique_order<T: Positioned>(list: &mut [T]) {
    for (index, item) in list.iter_mut().enumerate() {
        item.set_position(index as i64);
    }
}

/// Detect the signature of an interrupted reorder: two siblings persisted
/// with the same position key
pub fn has_duplicate_positions<T: Positioned>(list: &[T]) -> bool {
    let mut positions: Vec<i64> = list.iter().map(Positioned::position).collect();
    positions.sort_unstable();
    positions.windows(2).any(|pair| pair[0] == pair[1])
}

/// Restore position order after a reload, ties broken by current slot order
pub fn sort_by_position<T: Positioned>(list: &mut [T]) {
    list.sort_by_key(Positioned::position);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        pos: i64,
    }

    impl Positioned for Item {
        fn position(&self) -> i64 {
            self.pos
        }

        fn set_position(&mut self, position: i64) {
            self.pos = position;
        }
    }

    fn items(names: &[&'static str]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Item {
                name,
                pos: i as i64,
            })
            .collect()
    }

    #[test]
    fn test_next_position_empty_list() {
        let list: Vec<Item> = vec![];
        assert_eq!(next_position(&list), 0);
    }

    #[test]
    fn test_next_position_strictly_increasing() {
        let mut list: Vec<Item> = vec![];
        for _ in 0..5 {
            let pos = next_position(&list);
            list.push(Item { name: "x", pos });
        }
        let positions: Vec<i64> = list.iter().map(|i| i.pos).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
        assert!(!has_duplicate_positions(&list));
    }

    #[test]
    fn test_next_position_skips_gaps() {
        let list = vec![Item { name: "a", pos: 0 }, Item { name: "b", pos: 7 }];
        assert_eq!(next_position(&list), 8);
    }

    #[test]
    fn test_reorder_boundaries_are_noops() {
        let mut list = items(&["a", "b", "c"]);
        assert_eq!(reorder_adjacent(&mut list, 0, MoveDirection::Up), None);
        assert_eq!(reorder_adjacent(&mut list, 2, MoveDirection::Down), None);
        assert_eq!(list, items(&["a", "b", "c"]));
    }

    #[test]
    fn test_reorder_swaps_keys_without_duplicates() {
        let mut list = items(&["a", "b"]);
        assert_eq!(reorder_adjacent(&mut list, 1, MoveDirection::Up), Some(0));
        assert_eq!(list[0].name, "b");
        assert_eq!(list[0].pos, 0);
        assert_eq!(list[1].name, "a");
        assert_eq!(list[1].pos, 1);
        assert!(!has_duplicate_positions(&list));
    }

    #[test]
    fn test_reorder_inverse_restores_order() {
        let mut list = items(&["a", "b", "c"]);
        reorder_adjacent(&mut list, 1, MoveDirection::Down);
        reorder_adjacent(&mut list, 2, MoveDirection::Up);
        assert_eq!(list, items(&["a", "b", "c"]));
    }

    #[test]
    fn test_assign_unique_order_renumbers_densely() {
        let mut list = vec![
            Item { name: "a", pos: 3 },
            Item { name: "b", pos: 9 },
            Item { name: "c", pos: 9 },
        ];
        assign_unique_order(&mut list);
        let positions: Vec<i64> = list.iter().map(|i| i.pos).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_positions_detected() {
        let list = vec![Item { name: "a", pos: 1 }, Item { name: "b", pos: 1 }];
        assert!(has_duplicate_positions(&list));
    }
}
