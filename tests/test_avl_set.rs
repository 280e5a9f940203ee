use rand::Rng;
use rank_collections::avl_tree::AvlSet;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 100_000;
const VALUE_RANGE: u32 = 2048;

#[test]
fn int_test_set() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = AvlSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, VALUE_RANGE);

        if rng.gen::<bool>() {
            assert_eq!(set.insert(value), expected.insert(value));
        } else {
            assert_eq!(set.remove(&value), expected.take(&value));
        }

        assert_eq!(set.len(), expected.len());
        assert_eq!(set.min(), expected.iter().next());
    }

    assert_eq!(set.max(), expected.iter().next_back());
    assert_eq!(
        set.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    assert_eq!(
        set.iter().rev().collect::<Vec<&u32>>(),
        expected.iter().rev().collect::<Vec<&u32>>(),
    );

    for (index, value) in expected.iter().enumerate() {
        assert_eq!(set.rank(value), index);
        assert_eq!(set.select(index), Some(value));
    }
    assert_eq!(set.select(set.len()), None);

    for value in 0..VALUE_RANGE {
        assert_eq!(set.contains(&value), expected.contains(&value));

        let mut suffix = set.lower_bound(&value);
        let mut expected_suffix = expected.range(value..);
        assert_eq!(suffix.len(), expected_suffix.clone().count());
        assert_eq!(suffix.next(), expected_suffix.next());
    }

    let drained = set.into_iter().collect::<Vec<u32>>();
    let expected_drained = expected.into_iter().collect::<Vec<u32>>();
    assert_eq!(drained, expected_drained);
}
