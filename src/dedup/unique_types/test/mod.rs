//! Tests for unique_types implementations

use super::code::available_variants;
#[cfg(test)]
use super::code::UniqueTypesFn;
use super::{build_test_array, TestType, TypeRef};
use crate::error::{BenchError, Result};
use crate::utils::bench::seeded_rng;
use rand::Rng;
use std::sync::Arc;

/// Indices of the first occurrence of each instance, straight from the
/// definition.
fn first_occurrences(items: &[TypeRef]) -> Vec<usize> {
    (0..items.len())
        .filter(|&i| !items[..i].iter().any(|earlier| Arc::ptr_eq(earlier, &items[i])))
        .collect()
}

/// Check one output against the comparison contract: same length, same
/// instances, same first-occurrence order.
fn check_output(input: &[TypeRef], output: &[TypeRef]) -> std::result::Result<(), String> {
    let expected = first_occurrences(input);
    if output.len() != expected.len() {
        return Err(format!(
            "input of {} elements: expected {} unique, got {}",
            input.len(),
            expected.len(),
            output.len()
        ));
    }

    for (pos, (got, &idx)) in output.iter().zip(&expected).enumerate() {
        if !Arc::ptr_eq(got, &input[idx]) {
            return Err(format!(
                "input of {} elements: position {} holds id {}, expected the instance at input index {} (id {})",
                input.len(),
                pos,
                got.id,
                idx,
                input[idx].id
            ));
        }
    }

    Ok(())
}

/// Fixed battery of inputs covering the edge cases and both strategies
fn verification_inputs() -> Vec<Vec<TypeRef>> {
    let pool: Vec<TypeRef> = (0..12).map(|id| Arc::new(TestType { id })).collect();
    let (a, b, c) = (&pool[0], &pool[1], &pool[2]);

    let mut inputs = vec![
        Vec::new(),
        vec![a.clone()],
        vec![a.clone(), b.clone(), a.clone(), c.clone(), b.clone(), a.clone()],
        // Distinct instances with equal contents
        vec![Arc::new(TestType { id: 0 }), Arc::new(TestType { id: 0 }), a.clone()],
        pool.clone(),
        build_test_array(10, 5, 0x5eed),
        build_test_array(500, 3, 0xbeef),
    ];

    for len in [1, 2, 7, 8, 9, 64] {
        inputs.push(vec![a.clone(); len]);
        inputs.push((0..len).map(|i| pool[i % 2].clone()).collect());
    }

    let mut rng = seeded_rng(0xd0d0);
    for len in 0..40 {
        inputs.push(
            (0..len)
                .map(|_| pool[rng.random_range(0..pool.len())].clone())
                .collect(),
        );
    }

    inputs
}

/// Verify all variants against the comparison contract
pub fn verify_all() -> Result<()> {
    let inputs = verification_inputs();

    for variant in available_variants::<TypeRef>() {
        for input in &inputs {
            let output = (variant.function)(input);
            check_output(input, &output).map_err(|reason| {
                tracing::error!(variant = variant.name, %reason, "verification failed");
                BenchError::Verification {
                    variant: variant.name.to_string(),
                    reason,
                }
            })?;
        }
    }

    Ok(())
}

/// Every implementation path, including both sides of the dispatcher forced
/// explicitly and the reusable deduplicator.
#[cfg(test)]
fn all_paths() -> Vec<(&'static str, UniqueTypesFn<TypeRef>)> {
    use super::code::{unique_types_c, unique_types_with_threshold, Deduplicator};

    let mut paths: Vec<(&'static str, UniqueTypesFn<TypeRef>)> = available_variants::<TypeRef>()
        .into_iter()
        .map(|v| (v.name, v.function))
        .collect();
    paths.push(("forced_scan", |items: &[TypeRef]| unique_types_with_threshold(items, usize::MAX)));
    paths.push(("forced_keyed", |items: &[TypeRef]| unique_types_with_threshold(items, 0)));
    paths.push(("deduplicator", |items: &[TypeRef]| Deduplicator::new().dedupe(items)));
    paths.push(("c_direct", unique_types_c::<TypeRef>));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::identity::InstanceId;
    use crate::dedup::unique_types::code::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pool() -> Vec<TypeRef> {
        (0..10).map(|id| Arc::new(TestType { id })).collect()
    }

    fn ids(items: &[TypeRef]) -> Vec<usize> {
        items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_verify_all() {
        verify_all().expect("All variants should satisfy the comparison contract");
    }

    #[rstest]
    fn test_concrete_scenario(pool: Vec<TypeRef>) {
        let (a, b, c) = (&pool[0], &pool[1], &pool[2]);
        let input = vec![a.clone(), b.clone(), a.clone(), c.clone(), b.clone(), a.clone()];

        for (name, dedupe) in all_paths() {
            let out = dedupe(&input);
            assert_eq!(out.len(), 3, "{}", name);
            assert!(Arc::ptr_eq(&out[0], a), "{}", name);
            assert!(Arc::ptr_eq(&out[1], b), "{}", name);
            assert!(Arc::ptr_eq(&out[2], c), "{}", name);
        }
    }

    #[test]
    fn test_empty_and_single() {
        let x = Arc::new(TestType { id: 1 });
        for (name, dedupe) in all_paths() {
            assert!(dedupe(&[]).is_empty(), "{}", name);

            let out = dedupe(std::slice::from_ref(&x));
            assert_eq!(out.len(), 1, "{}", name);
            assert!(Arc::ptr_eq(&out[0], &x), "{}", name);
        }
    }

    #[rstest]
    fn test_no_duplicates_returns_input(pool: Vec<TypeRef>) {
        for len in [2, 7, 8, 10] {
            let input = &pool[..len];
            for (name, dedupe) in all_paths() {
                let out = dedupe(input);
                assert_eq!(out.len(), len, "{}", name);
                assert!(out.iter().zip(input).all(|(o, i)| Arc::ptr_eq(o, i)), "{}", name);
            }
        }
    }

    #[rstest]
    fn test_all_identical(#[values(2, 7, 8, 9, 100)] copies: usize) {
        let x = Arc::new(TestType { id: 42 });
        let input = vec![x.clone(); copies];
        for (name, dedupe) in all_paths() {
            let out = dedupe(&input);
            assert_eq!(out.len(), 1, "{}", name);
            assert!(Arc::ptr_eq(&out[0], &x), "{}", name);
        }
    }

    #[rstest]
    #[case(7)]
    #[case(8)]
    fn test_threshold_consistency(pool: Vec<TypeRef>, #[case] len: usize) {
        // B first, so the order cannot come from construction order.
        let input: Vec<TypeRef> = (0..len).map(|i| pool[1 - i % 2].clone()).collect();
        for (name, dedupe) in all_paths() {
            assert_eq!(ids(&dedupe(&input)), vec![1, 0], "{} at length {}", name, len);
        }
    }

    #[test]
    fn test_shuffled_duplicates_follow_given_order() {
        let input = build_test_array(10, 5, 1234);
        let mut expected = Vec::new();
        for r in &input {
            if !expected.contains(&r.id) {
                expected.push(r.id);
            }
        }
        assert_ne!(expected, (0..10).collect::<Vec<_>>(), "shuffle should reorder");

        for (name, dedupe) in all_paths() {
            assert_eq!(ids(&dedupe(&input)), expected, "{}", name);
        }
    }

    #[test]
    fn test_equal_values_are_not_merged() {
        let input: Vec<TypeRef> = (0..9).map(|_| Arc::new(TestType { id: 7 })).collect();
        for (name, dedupe) in all_paths() {
            assert_eq!(dedupe(&input).len(), 9, "{}", name);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = build_test_array(20, 3, 9);
        let before = input.clone();
        for (_, dedupe) in all_paths() {
            let _ = dedupe(&input);
            assert!(input.iter().zip(&before).all(|(a, b)| Arc::ptr_eq(a, b)));
        }
    }

    #[test]
    fn test_borrowed_references() {
        let values: Vec<String> = vec!["t".into(), "t".into(), "u".into()];
        let input = [&values[2], &values[0], &values[2], &values[1], &values[0]];

        for dedupe in [
            unique_types::<&String> as UniqueTypesFn<&String>,
            unique_types_keyed::<&String>,
            unique_types_c::<&String>,
        ] {
            let out = dedupe(&input);
            assert_eq!(out.len(), 3);
            assert!(std::ptr::eq(out[0], &values[2]));
            assert!(std::ptr::eq(out[1], &values[0]));
            assert!(std::ptr::eq(out[2], &values[1]));
        }
    }

    #[test]
    fn test_null_references() {
        let (a, b) = (TestType { id: 1 }, TestType { id: 2 });
        let mut input = vec![Some(&a), None, Some(&a), None, Some(&b)];
        input.extend([None, Some(&b), Some(&a)]);

        for dedupe in [
            unique_types_scan::<Option<&TestType>> as UniqueTypesFn<Option<&TestType>>,
            unique_types_keyed::<Option<&TestType>>,
            unique_types_seen_set::<Option<&TestType>>,
            unique_types_c::<Option<&TestType>>,
        ] {
            let out = dedupe(&input);
            assert_eq!(out.len(), 3);
            assert!(std::ptr::eq(out[0].unwrap(), &a));
            assert!(out[1].is_none());
            assert!(std::ptr::eq(out[2].unwrap(), &b));
        }
    }

    #[test]
    fn test_nested_null_references_agree_across_paths() {
        let value = 5u32;
        let input: Vec<Option<Option<&u32>>> =
            vec![None, Some(None), Some(Some(&value)), None, Some(None)];

        for dedupe in [
            unique_types_scan::<Option<Option<&u32>>> as UniqueTypesFn<Option<Option<&u32>>>,
            unique_types_keyed::<Option<Option<&u32>>>,
            unique_types_seen_set::<Option<Option<&u32>>>,
            unique_types_pooled::<Option<Option<&u32>>>,
            unique_types_c::<Option<Option<&u32>>>,
        ] {
            let out = dedupe(&input);
            assert_eq!(out, vec![None, Some(Some(&value))]);
        }
    }

    #[test]
    fn test_large_input_with_null_references() {
        let pool: Vec<TestType> = (0..100).map(|id| TestType { id }).collect();
        let mut input: Vec<Option<&TestType>> = Vec::new();
        for round in 0..3 {
            for (i, item) in pool.iter().enumerate() {
                if i % 25 == round {
                    input.push(None);
                }
                input.push(Some(item));
            }
        }
        assert!(input.len() > 128);

        for dedupe in [
            unique_types_c::<Option<&TestType>> as UniqueTypesFn<Option<&TestType>>,
            unique_types_keyed::<Option<&TestType>>,
            unique_types_scan::<Option<&TestType>>,
        ] {
            let out = dedupe(&input);
            assert_eq!(out.len(), 101);
            assert!(out[0].is_none());
            assert!(out[1..].iter().zip(&pool).all(|(o, p)| std::ptr::eq(o.unwrap(), p)));
        }
    }

    #[test]
    fn test_explicit_instance_ids() {
        let (x, y, z) = (InstanceId::next(), InstanceId::next(), InstanceId::next());
        let input = [z, x, z, y, x, z, y, x, y];
        assert_eq!(unique_types(&input), vec![z, x, y]);
        assert_eq!(unique_types_pooled(&input), vec![z, x, y]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const POOL: usize = 12;

    fn pool() -> Vec<TypeRef> {
        (0..POOL).map(|id| Arc::new(TestType { id })).collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn output_matches_first_occurrences(picks in prop::collection::vec(0..POOL, 0..48)) {
            let pool = pool();
            let input: Vec<TypeRef> = picks.iter().map(|&i| pool[i].clone()).collect();

            for (name, dedupe) in all_paths() {
                let out = dedupe(&input);
                prop_assert!(check_output(&input, &out).is_ok(), "{}: {:?}", name, check_output(&input, &out));
            }
        }

        #[test]
        fn output_has_no_repeats_and_covers_input(picks in prop::collection::vec(0..POOL, 0..48)) {
            let pool = pool();
            let input: Vec<TypeRef> = picks.iter().map(|&i| pool[i].clone()).collect();

            for (name, dedupe) in all_paths() {
                let out = dedupe(&input);
                prop_assert!(out.len() <= input.len(), "{}", name);
                for (i, a) in out.iter().enumerate() {
                    prop_assert!(out[i + 1..].iter().all(|b| !Arc::ptr_eq(a, b)), "{}", name);
                }
                for item in &input {
                    prop_assert_eq!(out.iter().filter(|o| Arc::ptr_eq(o, item)).count(), 1, "{}", name);
                }
            }
        }

        #[test]
        fn dedupe_is_idempotent(picks in prop::collection::vec(0..POOL, 0..48)) {
            let pool = pool();
            let input: Vec<TypeRef> = picks.iter().map(|&i| pool[i].clone()).collect();

            for (name, dedupe) in all_paths() {
                let once = dedupe(&input);
                let twice = dedupe(&once);
                prop_assert_eq!(once.len(), twice.len(), "{}", name);
                prop_assert!(once.iter().zip(&twice).all(|(a, b)| Arc::ptr_eq(a, b)), "{}", name);
            }
        }
    }
}
