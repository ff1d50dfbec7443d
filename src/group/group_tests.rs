use crate::group::Group;
use crate::permutation::Permutation;

#[test]
fn test_group_cyclic_c3() {
    let c3 = Group::from_generators("C3", &[Permutation::from_image(&[1, 2, 0])]);
    assert_eq!(c3.order(), 3);
    assert!(c3.is_abelian());
    assert_eq!(c3.class_number(), 3);

    let (identity, _) = c3.elements().get_index(0).unwrap();
    assert!(identity.is_identity());

    // Each element of an Abelian group is its own class, in element order.
    let classes = c3.conjugacy_class_elements();
    assert!(classes.iter().all(|cc| cc.len() == 1));
    assert!(classes[0][0].is_identity());
}

#[test]
fn test_group_symmetric_s3() {
    let s3 = Group::from_generators(
        "S3",
        &[
            Permutation::from_image(&[1, 0, 2]),
            Permutation::from_image(&[1, 2, 0]),
        ],
    );
    assert_eq!(s3.order(), 6);
    assert!(!s3.is_abelian());
    assert_eq!(s3.class_number(), 3);

    let classes = s3.conjugacy_class_elements();
    let mut class_sizes = classes.iter().map(Vec::len).collect::<Vec<_>>();
    class_sizes.sort_unstable();
    assert_eq!(class_sizes, vec![1, 2, 3]);

    // Class 0 is the identity-containing class.
    assert_eq!(classes[0].len(), 1);
    assert!(classes[0][0].is_identity());

    // Classes are closed under cycle pattern.
    for cc in &classes {
        let pattern = cc[0].cycle_pattern();
        assert!(cc.iter().all(|g| g.cycle_pattern() == pattern));
    }

    assert_eq!(s3.element_to_conjugacy_classes()[0], 0);
    assert_eq!(s3.generators().len(), 2);
}

#[test]
fn test_group_klein_four() {
    let v4 = Group::from_generators(
        "V4",
        &[
            Permutation::from_image(&[1, 0, 3, 2]),
            Permutation::from_image(&[2, 3, 0, 1]),
        ],
    );
    assert_eq!(v4.order(), 4);
    assert!(v4.is_abelian());
    assert_eq!(v4.class_number(), 4);
}

#[test]
fn test_group_from_explicit_elements() {
    let e = Permutation::identity(2);
    let t = Permutation::from_image(&[1, 0]);
    let s2 = Group::new("S2", vec![e, t]);
    assert_eq!(s2.order(), 2);
    assert_eq!(s2.class_number(), 2);
    assert!(s2.generators().is_empty());
}
