//! Member override-compatibility checking.
//!
//! Given a base class snapshot, [`OverridesChecker::for_class`] precomputes
//! the set of members a subclass could override. The build driver then asks,
//! per dependent class, whether any of its members is a valid override of a
//! base member ([`OverridesChecker::has_override_matching_members`]). A "no"
//! means a structural change to the base class cannot reach the dependent
//! through the override channel.
//!
//! The predicates implement the source-language override rules: exact name
//! match, visibility may only widen, suspend markers must agree, value
//! parameter lists must be equal element-wise, receivers must be equal, and
//! type-parameter arity must be equal. Properties additionally may not
//! narrow `var` to `val`.

use crate::meta::{ClassSnapshot, FunctionMember, MemberFlags, PropertyMember, Visibility};

/// Precomputed overridable-member view of one base class.
///
/// Immutable after construction. Holds its own copies of the overridable
/// members, so it stays valid after the source snapshot is discarded — the
/// driver caches checkers per class and metadata version (see
/// [`CheckerCache`](crate::cache::CheckerCache)).
#[derive(Clone, Debug)]
pub struct OverridesChecker {
    functions: Vec<FunctionMember>,
    properties: Vec<PropertyMember>,
}

impl OverridesChecker {
    /// Build a checker for `base_class`.
    ///
    /// A final class has no subclasses, so its member sets are left empty
    /// regardless of member modifiers; otherwise every non-private,
    /// non-final function and property is collected in declaration order.
    /// Always succeeds; a class with nothing overridable yields an inert
    /// checker.
    pub fn for_class(base_class: &ClassSnapshot) -> OverridesChecker {
        if base_class.is_final {
            return OverridesChecker {
                functions: Vec::new(),
                properties: Vec::new(),
            };
        }

        let functions: Vec<FunctionMember> = base_class
            .functions
            .iter()
            .filter(|f| is_overridable(f.visibility, f.flags))
            .cloned()
            .collect();
        let properties: Vec<PropertyMember> = base_class
            .properties
            .iter()
            .filter(|p| is_overridable(p.visibility, p.flags))
            .cloned()
            .collect();

        if !functions.is_empty() || !properties.is_empty() {
            tracing::trace!(
                class = %base_class.name,
                functions = functions.len(),
                properties = properties.len(),
                "collected overridable members",
            );
        }

        OverridesChecker {
            functions,
            properties,
        }
    }

    /// Whether the base class exposes at least one overridable member.
    #[inline]
    pub fn has_overridable_members(&self) -> bool {
        !self.functions.is_empty() || !self.properties.is_empty()
    }

    /// Whether `candidate` contains a member that is a valid override of
    /// some overridable base member.
    ///
    /// Existence check: scans functions against functions and properties
    /// against properties, returning on the first match. Member counts per
    /// class are small, so the nested scan is fine and no partial results
    /// are cached across calls.
    pub fn has_override_matching_members(&self, candidate: &ClassSnapshot) -> bool {
        if !self.functions.is_empty() {
            for sup in &self.functions {
                for sub in &candidate.functions {
                    if function_override_matches(sup, sub) {
                        return true;
                    }
                }
            }
        }
        if !self.properties.is_empty() {
            for sup in &self.properties {
                for sub in &candidate.properties {
                    if property_override_matches(sup, sub) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[inline]
fn is_overridable(visibility: Visibility, flags: MemberFlags) -> bool {
    !visibility.is_private() && !flags.is_final()
}

/// Whether `sub` can be a valid override of `sup`.
///
/// Cheap checks (name, modifier bits) run before the parameter-list
/// comparison; all checks must hold.
pub fn function_override_matches(sup: &FunctionMember, sub: &FunctionMember) -> bool {
    // Name must match
    if sup.name != sub.name {
        return false;
    }

    // Visibility can only widen
    if !sup.visibility.can_override_with(sub.visibility) {
        return false;
    }

    // Suspend marker must match
    if sup.flags.is_suspend() != sub.flags.is_suspend() {
        return false;
    }

    // Value parameter types: same length, same order
    if sup.param_types != sub.param_types {
        return false;
    }

    // Receiver type must match
    if sup.receiver != sub.receiver {
        return false;
    }

    // Type parameter count must match
    if sup.type_param_count != sub.type_param_count {
        return false;
    }

    true
}

/// Whether `sub` can be a valid override of `sup`.
pub fn property_override_matches(sup: &PropertyMember, sub: &PropertyMember) -> bool {
    // Name must match
    if sup.name != sub.name {
        return false;
    }

    // Visibility can only widen
    if !sup.visibility.can_override_with(sub.visibility) {
        return false;
    }

    // var cannot be overridden by val
    if sup.flags.is_var() && !sub.flags.is_var() {
        return false;
    }

    // Receiver type must match
    if sup.receiver != sub.receiver {
        return false;
    }

    // Type parameter count must match
    if sup.type_param_count != sub.type_param_count {
        return false;
    }

    true
}

#[cfg(test)]
mod tests;
