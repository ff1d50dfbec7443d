//! Finite groups generated by permutations, and their conjugacy classes.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::ops::Mul;

use derive_builder::Builder;
use indexmap::{IndexMap, IndexSet};
use log;
use ndarray::{s, Array2, Zip};
use rayon::prelude::*;

use crate::permutation::Permutation;

pub mod orbit;

#[cfg(test)]
mod group_tests;

/// A struct for managing abstract finite groups from an explicit list of
/// their elements.
#[derive(Builder, Clone)]
pub struct Group<T>
where
    T: Hash + Eq + Clone + Send + Sync + fmt::Debug,
{
    /// A name for the group.
    name: String,

    /// An ordered hash table containing the elements of the group. Element 0
    /// is always the identity.
    #[builder(setter(custom))]
    elements: IndexMap<T, usize>,

    /// The order of the group.
    #[builder(
        setter(skip),
        default = "self.elements.as_ref().expect(\"No group elements found.\").len()"
    )]
    order: usize,

    /// The generators this group was constructed from, if any.
    #[builder(default = "Vec::new()")]
    generators: Vec<T>,

    /// The Cayley table for this group w.r.t. the elements in [`Self::elements`].
    ///
    /// Each element in this array contains the index of the resultant element
    /// from the composition, w.r.t. the array [`Self::elements`]. Row elements
    /// are on the left, column elements on the right.
    #[builder(setter(skip), default = "None")]
    cayley_table: Option<Array2<usize>>,

    /// A vector of conjugacy classes for this group.
    ///
    /// Each element in the vector is a hashset containing the indices of the
    /// elements in [`Self::elements`] for a particular conjugacy class.
    /// Class 0 always contains the identity; classes are ordered by their
    /// smallest member index.
    #[builder(setter(skip), default = "None")]
    conjugacy_classes: Option<Vec<HashSet<usize>>>,

    /// The conjugacy class index of the elements in [`Self::elements`].
    #[builder(setter(skip), default = "None")]
    element_to_conjugacy_classes: Option<Vec<usize>>,

    /// The number of conjugacy classes of this group.
    #[builder(setter(skip), default = "None")]
    class_number: Option<usize>,
}

impl<T> GroupBuilder<T>
where
    T: Hash + Eq + Clone + Send + Sync + fmt::Debug,
{
    fn elements(&mut self, elems: Vec<T>) -> &mut Self {
        self.elements = Some(
            elems
                .into_iter()
                .enumerate()
                .map(|(i, element)| (element, i))
                .collect(),
        );
        self
    }
}

impl<T> Group<T>
where
    T: Hash + Eq + Clone + Send + Sync + fmt::Debug,
    for<'a, 'b> &'b T: Mul<&'a T, Output = T>,
{
    /// Returns a builder to construct a new group.
    pub fn builder() -> GroupBuilder<T> {
        GroupBuilder::default()
    }

    /// Constructs a group from its elements.
    ///
    /// # Arguments
    ///
    /// * `name` - A name to be given to the group.
    /// * `elements` - A vector of *all* group elements, the identity first.
    ///
    /// # Returns
    ///
    /// A group with its Cayley table constructed and conjugacy classes
    /// determined.
    pub fn new(name: &str, elements: Vec<T>) -> Self {
        let mut grp = Self::builder()
            .name(name.to_string())
            .elements(elements)
            .build()
            .expect("Unable to construct a group.");
        grp.construct_cayley_table();
        grp.find_conjugacy_classes();
        grp
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The order of the group.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The ordered element table of the group.
    pub fn elements(&self) -> &IndexMap<T, usize> {
        &self.elements
    }

    /// The generators this group was constructed from. Empty if the group was
    /// constructed from an explicit element list.
    pub fn generators(&self) -> &[T] {
        &self.generators
    }

    /// The number of conjugacy classes of the group.
    pub fn class_number(&self) -> usize {
        self.class_number.expect("Class number not found.")
    }

    /// The conjugacy class index of each element, in element order.
    pub fn element_to_conjugacy_classes(&self) -> &[usize] {
        self.element_to_conjugacy_classes
            .as_ref()
            .expect("No element-to-conjugacy-class mappings found.")
    }

    /// Materialises the conjugacy classes as vectors of owned elements.
    ///
    /// Within each class, elements appear in ascending element index, so the
    /// iteration order downstream consumers see is deterministic.
    pub fn conjugacy_class_elements(&self) -> Vec<Vec<T>> {
        self.conjugacy_classes
            .as_ref()
            .expect("Conjugacy classes not found.")
            .par_iter()
            .map(|cc| {
                let mut indices = cc.iter().copied().collect::<Vec<usize>>();
                indices.sort_unstable();
                indices
                    .into_iter()
                    .map(|i| {
                        self.elements
                            .get_index(i)
                            .unwrap_or_else(|| {
                                panic!("Element with index {i} cannot be retrieved.")
                            })
                            .0
                            .clone()
                    })
                    .collect()
            })
            .collect()
    }

    /// Checks if this group is Abelian.
    ///
    /// This method requires the Cayley table to have been constructed.
    pub fn is_abelian(&self) -> bool {
        let ctb = self.cayley_table.as_ref().expect("Cayley table not found.");
        ctb == ctb.t()
    }

    /// Constructs the Cayley table for the group.
    ///
    /// This method sets the [`Self::cayley_table`] field.
    fn construct_cayley_table(&mut self) {
        log::debug!("Constructing Cayley table in parallel...");
        let mut ctb = Array2::<usize>::zeros((self.order, self.order));
        Zip::indexed(&mut ctb).par_for_each(|(i, j), k| {
            let (op_i_ref, _) = self
                .elements
                .get_index(i)
                .unwrap_or_else(|| panic!("Element with index {i} cannot be retrieved."));
            let (op_j_ref, _) = self
                .elements
                .get_index(j)
                .unwrap_or_else(|| panic!("Element with index {j} cannot be retrieved."));
            let op_k = op_i_ref * op_j_ref;
            *k = *self.elements.get(&op_k).unwrap_or_else(|| {
                panic!(
                    "Group closure not fulfilled. The composition {op_i_ref:?} * {op_j_ref:?} = {op_k:?} is not contained in the group."
                )
            });
        });
        self.cayley_table = Some(ctb);
        log::debug!("Constructing Cayley table in parallel... Done.");
    }

    /// Finds the conjugacy classes for the group.
    ///
    /// This method sets the [`Self::conjugacy_classes`],
    /// [`Self::element_to_conjugacy_classes`], and [`Self::class_number`]
    /// fields.
    fn find_conjugacy_classes(&mut self) {
        log::debug!("Finding conjugacy classes...");
        if self.is_abelian() {
            log::debug!("Abelian group found.");
            // Abelian group; each element is in its own conjugacy class.
            self.conjugacy_classes =
                Some((0usize..self.order).map(|i| HashSet::from([i])).collect());
            self.element_to_conjugacy_classes = Some((0usize..self.order).collect());
        } else {
            // Non-Abelian group.
            log::debug!("Non-Abelian group found.");
            let mut ccs: Vec<HashSet<usize>> = vec![HashSet::from([0usize])];
            let mut e2ccs = vec![0usize; self.order];
            let mut remaining_elements: IndexSet<usize> = (1usize..self.order).collect();
            let ctb = self.cayley_table.as_ref().expect("Cayley table not found.");

            while !remaining_elements.is_empty() {
                // For a fixed g, find all h such that sg = hs for all s in the group.
                let g = *remaining_elements
                    .first()
                    .expect("Unexpected empty `remaining_elements`.");
                let mut cur_cc = HashSet::from([g]);
                for s in 0usize..self.order {
                    let sg = ctb[[s, g]];
                    let ctb_xs = ctb.slice(s![.., s]);
                    let h = ctb_xs.iter().position(|&x| x == sg).unwrap_or_else(|| {
                        panic!("No element `{sg}` can be found in column `{s}` of Cayley table.")
                    });
                    if remaining_elements.shift_remove(&h) {
                        cur_cc.insert(h);
                    }
                }
                ccs.push(cur_cc);
            }
            ccs.sort_by_key(|cc| {
                *cc.iter()
                    .min()
                    .expect("Unable to find the minimum element index in one conjugacy class.")
            });
            ccs.iter().enumerate().for_each(|(i, cc)| {
                cc.iter().for_each(|&j| e2ccs[j] = i);
            });
            assert!(e2ccs.iter().skip(1).all(|&x| x > 0));
            self.conjugacy_classes = Some(ccs);
            self.element_to_conjugacy_classes = Some(e2ccs);
        }
        self.class_number = Some(
            self.conjugacy_classes
                .as_ref()
                .expect("Conjugacy classes not found.")
                .len(),
        );
        log::debug!("Finding conjugacy classes... Done.");
    }
}

impl Group<Permutation> {
    /// Constructs a permutation group as the closure of a list of generators.
    ///
    /// The identity is inserted first, and the remaining elements are
    /// discovered breadth-first, so the element order (and therefore the
    /// conjugacy class order) is deterministic for a fixed generator list.
    ///
    /// # Panics
    ///
    /// Panics if `generators` is empty or if the generators act on label
    /// universes of different sizes.
    pub fn from_generators(name: &str, generators: &[Permutation]) -> Self {
        assert!(
            !generators.is_empty(),
            "At least one generator is required to construct a group."
        );
        let rank = generators[0].rank();
        assert!(
            generators.iter().all(|g| g.rank() == rank),
            "All generators must permute the same label universe."
        );

        let identity = Permutation::identity(rank);
        let mut elements = IndexSet::from([identity.clone()]);
        let mut queue = VecDeque::from([identity]);
        while let Some(element) = queue.pop_front() {
            for generator in generators {
                let product = generator * &element;
                if elements.insert(product.clone()) {
                    queue.push_back(product);
                }
            }
        }
        log::debug!(
            "Generated group `{name}` of order {} from {} generator(s).",
            elements.len(),
            generators.len()
        );

        let mut grp = Self::builder()
            .name(name.to_string())
            .elements(elements.into_iter().collect())
            .generators(generators.to_vec())
            .build()
            .expect("Unable to construct a group.");
        grp.construct_cayley_table();
        grp.find_conjugacy_classes();
        grp
    }
}
