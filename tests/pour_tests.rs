//! Pour engine tests

use water_sort::PuzzleState;
use water_sort::Tube;
use water_sort::pour::{get_pourable_amount, pour};

const CAPACITY: usize = 4;

fn tubes(repr: &str) -> Vec<Tube> {
    PuzzleState::new_from_repr(repr, CAPACITY)
        .unwrap()
        .tubes()
        .to_vec()
}

const BOARDS: [&str; 6] = [
    "AABC|BBCA|CCAB||",
    "ABBB|B|AA|",
    "AAAA||BBBB",
    "ABCD|DCBA|A|D|",
    "AB|BA",
    "CCCA|AAAC|B|BBB",
];

#[test]
fn test_pour_moves_layers_iff_legal() {
    for board in BOARDS {
        let before = tubes(board);
        for a in 0..before.len() {
            for b in 0..before.len() {
                let mut after = before.clone();
                let moved = pour(&mut after, a, b);

                let legal = a != b
                    && !before[a].is_empty()
                    && (before[b].is_empty() || before[b].top_color() == before[a].top_color());
                let expected = if legal {
                    before[a].top_run_length().min(CAPACITY - before[b].len())
                } else {
                    0
                };
                assert_eq!(moved, expected, "{board}: pour {a} -> {b}");

                if moved == 0 {
                    assert_eq!(after, before, "{board}: pour {a} -> {b} changed tubes");
                } else {
                    assert_eq!(
                        after[a].len() + after[b].len(),
                        before[a].len() + before[b].len()
                    );
                    assert_eq!(after[a].len(), before[a].len() - moved);
                    assert_eq!(after[b].len(), before[b].len() + moved);
                }
            }
        }
    }
}

#[test]
fn test_pour_into_itself_is_noop() {
    let mut t = tubes("ABBB|B|AA|");
    let before = t.clone();
    assert_eq!(pour(&mut t, 0, 0), 0);
    assert_eq!(t, before);
}

#[test]
fn test_pour_from_empty_is_noop() {
    let mut t = tubes("|AA");
    assert_eq!(pour(&mut t, 0, 1), 0);
    assert_eq!(t, tubes("|AA"));
}

#[test]
fn test_illegal_pour_is_noop() {
    let mut t = tubes("AB|BA");
    assert_eq!(pour(&mut t, 0, 1), 0);
    assert_eq!(pour(&mut t, 1, 0), 0);
    assert_eq!(t, tubes("AB|BA"));
}

#[test]
fn test_out_of_range_is_noop() {
    let mut t = tubes("AB|");
    assert_eq!(pour(&mut t, 0, 5), 0);
    assert_eq!(pour(&mut t, 9, 1), 0);
    assert_eq!(t, tubes("AB|"));
}

#[test]
fn test_run_is_limited_by_space() {
    let mut t = tubes("ABBB|CB");
    assert_eq!(get_pourable_amount(&t[0], &t[1]), 2);
    assert_eq!(pour(&mut t, 0, 1), 2);
    assert_eq!(t, tubes("AB|CBBB"));
}

#[test]
fn test_whole_run_moves_into_empty_tube() {
    let mut t = tubes("ACCC|");
    assert_eq!(pour(&mut t, 0, 1), 3);
    assert_eq!(t, tubes("A|CCC"));
}

#[test]
fn test_order_is_preserved() {
    let mut t = tubes("BAA|CA");
    assert_eq!(pour(&mut t, 0, 1), 2);
    assert_eq!(t[0].text_representation(), "B");
    assert_eq!(t[1].text_representation(), "CAAA");
}
