// use env_logger;
use num::BigRational;

use crate::group::Group;
use crate::io::LineSink;
use crate::linalg::rref;
use crate::permutation::Permutation;
use crate::projection::CharacterProjection;
use crate::sparse::{SparseSet, SparseSimplexVector};

fn rat(numer: i64, denom: i64) -> BigRational {
    BigRational::new(numer.into(), denom.into())
}

/// Assigns one character value per conjugacy class based on the cycle
/// pattern of a class representative.
fn character_by_pattern(
    classes: &[Vec<Permutation>],
    value_of: impl Fn(&[usize]) -> i64,
) -> Vec<BigRational> {
    classes
        .iter()
        .map(|cc| rat(value_of(&cc[0].cycle_pattern()), 1))
        .collect()
}

#[test]
fn test_projection_c3_trivial_character() {
    let c3 = Group::from_generators("C3", &[Permutation::from_image(&[1, 2, 0])]);
    let classes = c3.conjugacy_class_elements();
    let character = vec![rat(1, 1); 3];
    let projection = CharacterProjection::builder()
        .order(c3.order())
        .generators(c3.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();

    let basis = projection
        .basis(&[SparseSet::from_labels([0])], None)
        .unwrap();
    assert_eq!(basis.len(), 1);

    // The all-ones symmetrisation with coefficient 1/3 on each singleton.
    let expected = [
        (SparseSet::from_labels([0]), rat(1, 3)),
        (SparseSet::from_labels([1]), rat(1, 3)),
        (SparseSet::from_labels([2]), rat(1, 3)),
    ]
    .into_iter()
    .collect::<SparseSimplexVector>();
    assert_eq!(basis[0], expected);
}

#[test]
fn test_projection_s2_trivial_and_sign_characters() {
    let s2 = Group::from_generators("S2", &[Permutation::from_image(&[1, 0])]);
    let classes = s2.conjugacy_class_elements();
    let oreps = [SparseSet::from_labels([0])];

    let trivial = vec![rat(1, 1), rat(1, 1)];
    let projection = CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&trivial)
        .build()
        .unwrap();
    let basis = projection.basis(&oreps, None).unwrap();
    assert_eq!(basis.len(), 1);
    assert_eq!(basis[0].coefficient(&SparseSet::from_labels([0])), rat(1, 2));
    assert_eq!(basis[0].coefficient(&SparseSet::from_labels([1])), rat(1, 2));

    let sign = vec![rat(1, 1), rat(-1, 1)];
    let projection = CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&sign)
        .build()
        .unwrap();
    let basis = projection.basis(&oreps, None).unwrap();
    assert_eq!(basis.len(), 1);
    assert_eq!(basis[0].coefficient(&SparseSet::from_labels([0])), rat(1, 2));
    assert_eq!(
        basis[0].coefficient(&SparseSet::from_labels([1])),
        rat(-1, 2)
    );
}

#[test]
fn test_projection_zero_character_yields_empty_basis() {
    let c3 = Group::from_generators("C3", &[Permutation::from_image(&[1, 2, 0])]);
    let classes = c3.conjugacy_class_elements();
    let character = vec![rat(0, 1); 3];
    let projection = CharacterProjection::builder()
        .order(c3.order())
        .generators(c3.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();

    let basis = projection
        .basis(
            &[SparseSet::from_labels([0]), SparseSet::from_labels([0, 1])],
            None,
        )
        .unwrap();
    assert!(basis.is_empty());
}

#[test]
fn test_projection_empty_representatives() {
    let s2 = Group::from_generators("S2", &[Permutation::from_image(&[1, 0])]);
    let classes = s2.conjugacy_class_elements();
    let character = vec![rat(1, 1), rat(1, 1)];
    let projection = CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();
    let basis = projection.basis(&[], None).unwrap();
    assert!(basis.is_empty());
}

#[test]
fn test_projection_s3_standard_character_rank() {
    // env_logger::init();
    // S3 acting on the edges of a triangle; the standard character is 2 at
    // the identity, 0 on transpositions and -1 on 3-cycles.
    let s3 = Group::from_generators(
        "S3",
        &[
            Permutation::from_image(&[1, 0, 2]),
            Permutation::from_image(&[1, 2, 0]),
        ],
    );
    let classes = s3.conjugacy_class_elements();
    let character = character_by_pattern(&classes, |pattern| match pattern {
        [1, 1, 1] => 2,
        [2, 1] => 0,
        [3] => -1,
        _ => panic!("Unexpected cycle pattern in S3."),
    });
    let projection = CharacterProjection::builder()
        .order(s3.order())
        .generators(s3.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();

    let basis = projection
        .basis(&[SparseSet::from_labels([0, 1])], None)
        .unwrap();
    assert_eq!(basis.len(), 2);
    assert_eq!(
        basis[0].coefficient(&SparseSet::from_labels([0, 1])),
        rat(2, 3)
    );
    assert_eq!(
        basis[0].coefficient(&SparseSet::from_labels([1, 2])),
        rat(-1, 3)
    );
    assert_eq!(
        basis[0].coefficient(&SparseSet::from_labels([0, 2])),
        rat(-1, 3)
    );

    // The output's rank equals the number of vectors returned.
    let all_keys = [
        SparseSet::from_labels([0, 1]),
        SparseSet::from_labels([1, 2]),
        SparseSet::from_labels([0, 2]),
    ];
    let mut stacked = ndarray::Array2::<BigRational>::zeros((basis.len(), all_keys.len()));
    for (row, vector) in basis.iter().enumerate() {
        for (col, key) in all_keys.iter().enumerate() {
            stacked[(row, col)] = vector.coefficient(key);
        }
    }
    let (_, nullity) = rref(&stacked);
    assert_eq!(all_keys.len() - nullity, basis.len());
}

#[test]
fn test_projection_s3_sign_character_annihilates_edges() {
    // Every edge is fixed by a transposition, so the sign projection of the
    // edge module vanishes.
    let s3 = Group::from_generators(
        "S3",
        &[
            Permutation::from_image(&[1, 0, 2]),
            Permutation::from_image(&[1, 2, 0]),
        ],
    );
    let classes = s3.conjugacy_class_elements();
    let character = character_by_pattern(&classes, |pattern| match pattern {
        [1, 1, 1] => 1,
        [2, 1] => -1,
        [3] => 1,
        _ => panic!("Unexpected cycle pattern in S3."),
    });
    let projection = CharacterProjection::builder()
        .order(s3.order())
        .generators(s3.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();

    let basis = projection
        .basis(&[SparseSet::from_labels([0, 1])], None)
        .unwrap();
    assert!(basis.is_empty());
}

#[test]
fn test_projection_basis_streams_to_sink() {
    let c3 = Group::from_generators("C3", &[Permutation::from_image(&[1, 2, 0])]);
    let classes = c3.conjugacy_class_elements();
    let character = vec![rat(1, 1); 3];
    let projection = CharacterProjection::builder()
        .order(c3.order())
        .generators(c3.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();

    let mut sink = LineSink::new(Vec::<u8>::new());
    let basis = projection
        .basis(&[SparseSet::from_labels([0])], Some(&mut sink))
        .unwrap();
    // Streamed vectors are not buffered in memory.
    assert!(basis.is_empty());
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text, "{({0} 1/3) ({1} 1/3) ({2} 1/3)}\n");
}

#[test]
fn test_spanning_set_consecutive_duplicate_guard() {
    let c3 = Group::from_generators("C3", &[Permutation::from_image(&[1, 2, 0])]);
    let classes = c3.conjugacy_class_elements();
    let character = vec![rat(1, 1); 3];
    let projection = CharacterProjection::builder()
        .order(c3.order())
        .generators(c3.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();

    // All three orbit elements project to the same vector; only the first
    // survives the consecutive-duplicate guard.
    let (spanning, support) = projection
        .spanning_set_and_support(&[SparseSet::from_labels([0])], false, None)
        .unwrap();
    assert_eq!(spanning.len(), 1);
    assert!(support.is_empty());
    let expected = [
        (SparseSet::from_labels([0]), rat(1, 3)),
        (SparseSet::from_labels([1]), rat(1, 3)),
        (SparseSet::from_labels([2]), rat(1, 3)),
    ]
    .into_iter()
    .collect::<SparseSimplexVector>();
    assert_eq!(spanning[0], expected);
}

#[test]
fn test_spanning_set_unsnapped_coefficients() {
    // The spanning path rescales by χ(e)/|Γ| but does not integer-snap, so
    // stabiliser multiplicities show up directly: for S3 on edges each
    // coefficient is 2 · (1/6) = 1/3 for the trivial character.
    let s3 = Group::from_generators(
        "S3",
        &[
            Permutation::from_image(&[1, 0, 2]),
            Permutation::from_image(&[1, 2, 0]),
        ],
    );
    let classes = s3.conjugacy_class_elements();
    let character = character_by_pattern(&classes, |_| 1);
    let projection = CharacterProjection::builder()
        .order(s3.order())
        .generators(s3.generators())
        .conjugacy_classes(&classes)
        .character(&character)
        .build()
        .unwrap();

    let (spanning, _) = projection
        .spanning_set_and_support(&[SparseSet::from_labels([0, 1])], false, None)
        .unwrap();
    assert_eq!(spanning.len(), 1);
    assert_eq!(
        spanning[0].coefficient(&SparseSet::from_labels([0, 1])),
        rat(1, 3)
    );
}

#[test]
fn test_support_calculation_is_exclusive() {
    let s2 = Group::from_generators("S2", &[Permutation::from_image(&[1, 0])]);
    let classes = s2.conjugacy_class_elements();
    let sign = vec![rat(1, 1), rat(-1, 1)];
    let projection = CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&sign)
        .build()
        .unwrap();

    let (spanning, support) = projection
        .spanning_set_and_support(&[SparseSet::from_labels([0])], true, None)
        .unwrap();
    assert!(spanning.is_empty());
    assert_eq!(support.len(), 2);
    assert!(support.contains(&SparseSet::from_labels([0])));
    assert!(support.contains(&SparseSet::from_labels([1])));
}

#[test]
fn test_support_streams_to_sink() {
    let s2 = Group::from_generators("S2", &[Permutation::from_image(&[1, 0])]);
    let classes = s2.conjugacy_class_elements();
    let trivial = vec![rat(1, 1), rat(1, 1)];
    let projection = CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&trivial)
        .build()
        .unwrap();

    let mut sink = LineSink::new(Vec::<u8>::new());
    projection
        .spanning_set_and_support(&[SparseSet::from_labels([0])], true, Some(&mut sink))
        .unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text, "{{0} {1}}\n");
}

#[test]
fn test_projection_builder_validation() {
    let s2 = Group::from_generators("S2", &[Permutation::from_image(&[1, 0])]);
    let classes = s2.conjugacy_class_elements();

    // One character value per class is required.
    let short = vec![rat(1, 1)];
    assert!(CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&short)
        .build()
        .is_err());

    // A nonzero character must not vanish at the identity.
    let degenerate = vec![rat(0, 1), rat(1, 1)];
    assert!(CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&degenerate)
        .build()
        .is_err());

    // The identically zero character is accepted.
    let zero = vec![rat(0, 1), rat(0, 1)];
    assert!(CharacterProjection::builder()
        .order(s2.order())
        .generators(s2.generators())
        .conjugacy_classes(&classes)
        .character(&zero)
        .build()
        .is_ok());
}
