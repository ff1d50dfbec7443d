//! # isotypic: sparse isotypic components of finite permutation group actions
//!
//! Given a finite group acting on a large combinatorial family (*e.g.* the
//! facets of a polytope or the faces of a triangulated object) and an
//! irreducible character of that group, this crate computes, in exact
//! rational arithmetic, a basis of the subspace of the induced permutation
//! module that transforms according to that character, *i.e.* the
//! character's *isotypic component*.
//!
//! The work is organised around:
//! - orbit-based work reduction: the caller supplies one representative per
//!   orbit of the induced action, and each orbit is projected independently
//!   in its own local coordinate block;
//! - character-weighted projection sums taken class by class, skipping
//!   conjugacy classes on which the character vanishes;
//! - incremental rank maintenance ([`linalg::rowspace::RowspaceTracker`]),
//!   so that testing a candidate projection for linear independence costs
//!   one matrix–vector product instead of a refactorisation;
//! - an independent verification procedure
//!   ([`projection::spans_invariant_subspace`]) that certifies a claimed
//!   spanning family is actually closed under the group action.
//!
//! All arithmetic is exact ([`num::BigRational`]); there are no thresholds
//! and no floating-point state anywhere in the engine.

pub mod group;
pub mod io;
pub mod linalg;
pub mod permutation;
pub mod projection;
pub mod sparse;
