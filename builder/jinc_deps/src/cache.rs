//! Checker caching and the metadata provider boundary.
//!
//! The metadata provider owns class snapshots and their versions; this
//! module gives the build driver a place to keep [`OverridesChecker`]s
//! alive across decisions. A cached checker stays valid until the class's
//! metadata version moves, at which point [`CheckerCache::get_or_build`]
//! rebuilds it from the fresh snapshot.
//!
//! Single-threaded like the rest of the core; the driver owns the cache.

use rustc_hash::FxHashMap;

use crate::meta::ClassSnapshot;
use crate::overrides::OverridesChecker;

/// Source of class member metadata.
///
/// Implemented by the build system's class-file / metadata reader. Must be
/// deterministic for a given metadata version: the same version always
/// yields the same snapshot.
pub trait ClassMetadataProvider {
    /// The current snapshot for `class_name`, if the class is known.
    fn class_snapshot(&self, class_name: &str) -> Option<&ClassSnapshot>;

    /// The current metadata version for `class_name`, if the class is known.
    /// Moves whenever the class's declared members change.
    fn metadata_version(&self, class_name: &str) -> Option<u64>;
}

/// Trivial map-backed provider, used by drivers that precompute snapshots
/// and by tests.
#[derive(Default, Debug)]
pub struct InMemoryMetadataProvider {
    classes: FxHashMap<String, (u64, ClassSnapshot)>,
}

impl InMemoryMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a class, bumping it to `version`.
    pub fn insert(&mut self, version: u64, snapshot: ClassSnapshot) {
        self.classes
            .insert(snapshot.name.clone(), (version, snapshot));
    }

    pub fn remove(&mut self, class_name: &str) {
        self.classes.remove(class_name);
    }
}

impl ClassMetadataProvider for InMemoryMetadataProvider {
    fn class_snapshot(&self, class_name: &str) -> Option<&ClassSnapshot> {
        self.classes.get(class_name).map(|(_, snapshot)| snapshot)
    }

    fn metadata_version(&self, class_name: &str) -> Option<u64> {
        self.classes.get(class_name).map(|(version, _)| *version)
    }
}

/// Per-class checker cache keyed on metadata version.
///
/// One entry per class name; a lookup under a different version replaces
/// the stale checker instead of accumulating old ones.
#[derive(Default, Debug)]
pub struct CheckerCache {
    checkers: FxHashMap<String, (u64, OverridesChecker)>,
}

impl CheckerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The checker for `snapshot` at `version`, building it on first use
    /// or when the cached entry was produced under an older version.
    pub fn get_or_build(&mut self, version: u64, snapshot: &ClassSnapshot) -> &OverridesChecker {
        let entry = self
            .checkers
            .entry(snapshot.name.clone())
            .and_modify(|slot| {
                if slot.0 != version {
                    *slot = (version, OverridesChecker::for_class(snapshot));
                }
            })
            .or_insert_with(|| (version, OverridesChecker::for_class(snapshot)));
        &entry.1
    }

    /// The checker for `class_name` as the provider currently sees it, or
    /// `None` for an unknown class. Rebuilds on version change, like
    /// [`get_or_build`](CheckerCache::get_or_build).
    pub fn lookup<P: ClassMetadataProvider>(
        &mut self,
        provider: &P,
        class_name: &str,
    ) -> Option<&OverridesChecker> {
        let version = provider.metadata_version(class_name)?;
        let snapshot = provider.class_snapshot(class_name)?;
        Some(self.get_or_build(version, snapshot))
    }

    /// Drop the cached checker for `class_name`, if any.
    pub fn invalidate(&mut self, class_name: &str) {
        self.checkers.remove(class_name);
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    pub fn clear(&mut self) {
        self.checkers.clear();
    }
}
