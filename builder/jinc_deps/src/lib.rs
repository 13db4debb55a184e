//! Dependency-analysis core for the jinc incremental JVM builder.
//!
//! After a source change, the build driver must decide which dependent
//! classes can possibly be affected by a structural change to a base class.
//! For JVM languages with open-by-annotation member semantics the deciding
//! question is: *does the changed base class expose overridable members, and
//! does a given dependent class contain members that are valid overrides of
//! them?* If not, the dependent cannot be affected through the override
//! channel and needs no recompilation on that account.
//!
//! This crate answers that question:
//!
//! - [`meta`] — immutable snapshots of a class's JVM-visible members
//!   ([`ClassSnapshot`], [`FunctionMember`], [`PropertyMember`]), supplied
//!   by an external metadata provider and versioned by it.
//! - [`overrides`] — the [`OverridesChecker`]: per-base-class precomputed
//!   overridable-member sets and the override-compatibility predicates
//!   (visibility widening, suspend marker, signature equality).
//! - [`cache`] — a version-keyed [`CheckerCache`] so a driver can reuse
//!   checkers across decisions until a class's metadata changes.
//!
//! Everything here is pure and single-threaded: snapshots in, booleans out.
//! No I/O, no interior mutability.

pub mod cache;
pub mod meta;
pub mod overrides;

pub use cache::{CheckerCache, ClassMetadataProvider, InMemoryMetadataProvider};
pub use meta::{
    ClassSnapshot, FunctionMember, MemberFlags, PropertyMember, TypeRef, Visibility,
};
pub use overrides::{
    function_override_matches, property_override_matches, OverridesChecker,
};
