//! The pour operation.
//!
//! A pour moves the top run of the source onto the target when the target is
//! empty or shows the same color on top. Illegal pours are silent no-ops that
//! report zero moved layers.

use log::debug;

use crate::model::Tube;

/// Borrow two distinct tubes mutably. `None` when the indices are equal or out of
/// range.
fn pair_mut(tubes: &mut [Tube], a: usize, b: usize) -> Option<(&mut Tube, &mut Tube)> {
    if a == b || a >= tubes.len() || b >= tubes.len() {
        return None;
    }
    if a < b {
        let (left, right) = tubes.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = tubes.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}

/// Layers a pour from `source` into `target` would move.
pub fn get_pourable_amount(source: &Tube, target: &Tube) -> usize {
    let Some(color) = source.top_color() else {
        return 0;
    };
    if !target.accepts(color) {
        return 0;
    }
    source.top_run_length().min(target.empty_space())
}

/// Pour by index without observing the individual steps.
pub fn pour(tubes: &mut [Tube], source: usize, target: usize) -> usize {
    pour_with(tubes, source, target, |_, _| {})
}

/// Pour one layer at a time, calling `on_step` with both tubes after each layer
/// lands. Returns the number of layers moved.
pub fn pour_with<F>(tubes: &mut [Tube], source: usize, target: usize, mut on_step: F) -> usize
where
    F: FnMut(&Tube, &Tube),
{
    let Some((from, to)) = pair_mut(tubes, source, target) else {
        return 0;
    };
    let amount = get_pourable_amount(from, to);
    for _ in 0..amount {
        if let Some(color) = from.pop_layer() {
            to.push_layer(color);
            on_step(from, to);
        }
    }
    debug!("Pour {source} -> {target}: {amount} layer(s), now {from} {to}");
    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PuzzleState;

    fn tubes(repr: &str) -> Vec<Tube> {
        PuzzleState::new_from_repr(repr, 4).unwrap().tubes().to_vec()
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut t = tubes("A|B|C");
        let (x, y) = pair_mut(&mut t, 2, 0).unwrap();
        assert_eq!(x.text_representation(), "C");
        assert_eq!(y.text_representation(), "A");
        assert!(pair_mut(&mut t, 1, 1).is_none());
        assert!(pair_mut(&mut t, 1, 3).is_none());
    }

    #[test]
    fn test_steps_are_single_layers_in_order() {
        let mut t = tubes("ABCC|C");
        let mut seen = Vec::new();
        let moved = pour_with(&mut t, 0, 1, |from, to| {
            seen.push((from.text_representation(), to.text_representation()));
        });
        assert_eq!(moved, 2);
        assert_eq!(
            seen,
            vec![
                ("ABC".to_string(), "CC".to_string()),
                ("AB".to_string(), "CCC".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_target_moves_nothing() {
        let mut t = tubes("AA|BAAA");
        assert_eq!(pour(&mut t, 0, 1), 0);
        assert_eq!(t, tubes("AA|BAAA"));
    }
}
