use super::*;
use crate::meta::{MemberFlags, Visibility};

fn fun(name: &str, vis: Visibility) -> FunctionMember {
    FunctionMember::new(name, vis)
}

fn prop(name: &str, vis: Visibility) -> PropertyMember {
    PropertyMember::new(name, vis)
}

fn class_with_fn(f: FunctionMember) -> ClassSnapshot {
    ClassSnapshot::new("test/Base").with_functions([f])
}

fn class_with_prop(p: PropertyMember) -> ClassSnapshot {
    ClassSnapshot::new("test/Base").with_properties([p])
}

// === Construction ===

#[test]
fn final_class_has_no_overridable_members() {
    let base = ClassSnapshot::new("test/Sealed")
        .sealed()
        .with_functions([fun("render", Visibility::Public)])
        .with_properties([prop("size", Visibility::Public)]);
    let checker = OverridesChecker::for_class(&base);
    assert!(!checker.has_overridable_members());
}

#[test]
fn private_and_final_members_are_not_collected() {
    let base = ClassSnapshot::new("test/Base")
        .with_functions([
            fun("hidden", Visibility::Private),
            fun("frozen", Visibility::Public).with_flags(MemberFlags::FINAL),
        ])
        .with_properties([prop("secret", Visibility::Private)]);
    let checker = OverridesChecker::for_class(&base);
    assert!(!checker.has_overridable_members());
}

#[test]
fn open_members_are_collected() {
    let base = ClassSnapshot::new("test/Base")
        .with_functions([fun("render", Visibility::Protected)])
        .with_properties([prop("size", Visibility::Internal)]);
    let checker = OverridesChecker::for_class(&base);
    assert!(checker.has_overridable_members());
}

#[test]
fn empty_class_yields_inert_checker() {
    let checker = OverridesChecker::for_class(&ClassSnapshot::new("test/Empty"));
    assert!(!checker.has_overridable_members());
    assert!(!checker.has_override_matching_members(
        &ClassSnapshot::new("test/Sub").with_functions([fun("anything", Visibility::Public)])
    ));
}

// === Function matching ===

#[test]
fn identical_signature_matches() {
    let base = class_with_fn(fun("draw", Visibility::Public).with_params(["I", "J"]));
    let sub = class_with_fn(fun("draw", Visibility::Public).with_params(["I", "J"]));
    assert!(OverridesChecker::for_class(&base).has_override_matching_members(&sub));
}

#[test]
fn name_mismatch_does_not_match() {
    let base = class_with_fn(fun("draw", Visibility::Public));
    let sub = class_with_fn(fun("paint", Visibility::Public));
    assert!(!OverridesChecker::for_class(&base).has_override_matching_members(&sub));
}

#[test]
fn parameter_order_matters() {
    let sup = fun("draw", Visibility::Public).with_params(["I", "J"]);
    let sub = fun("draw", Visibility::Public).with_params(["J", "I"]);
    assert!(!function_override_matches(&sup, &sub));
}

#[test]
fn parameter_count_matters() {
    let sup = fun("draw", Visibility::Public).with_params(["I"]);
    let sub = fun("draw", Visibility::Public).with_params(["I", "I"]);
    assert!(!function_override_matches(&sup, &sub));
}

#[test]
fn suspend_marker_must_agree() {
    let sup = fun("fetch", Visibility::Public).with_flags(MemberFlags::SUSPEND);
    let sub = fun("fetch", Visibility::Public);
    assert!(!function_override_matches(&sup, &sub));
    assert!(!function_override_matches(&sub, &sup));

    let sub = fun("fetch", Visibility::Public).with_flags(MemberFlags::SUSPEND);
    assert!(function_override_matches(&sup, &sub));
}

#[test]
fn receiver_must_agree() {
    let sup = fun("format", Visibility::Public).with_receiver("kotlin/String");
    let sub = fun("format", Visibility::Public);
    assert!(!function_override_matches(&sup, &sub));

    let sub = fun("format", Visibility::Public).with_receiver("kotlin/Int");
    assert!(!function_override_matches(&sup, &sub));

    let sub = fun("format", Visibility::Public).with_receiver("kotlin/String");
    assert!(function_override_matches(&sup, &sub));
}

#[test]
fn type_parameter_arity_must_agree() {
    let sup = fun("map", Visibility::Public).with_type_params(1);
    let sub = fun("map", Visibility::Public).with_type_params(2);
    assert!(!function_override_matches(&sup, &sub));
}

// === Visibility widening ===

#[test]
fn private_base_member_never_matches() {
    for vis in [
        Visibility::Private,
        Visibility::Protected,
        Visibility::Internal,
        Visibility::Public,
    ] {
        let sup = fun("f", Visibility::Private);
        let sub = fun("f", vis);
        assert!(!function_override_matches(&sup, &sub), "matched at {vis}");
    }
}

#[test]
fn protected_base_accepts_same_or_wider() {
    let sup = fun("f", Visibility::Protected);
    assert!(function_override_matches(&sup, &fun("f", Visibility::Protected)));
    assert!(function_override_matches(&sup, &fun("f", Visibility::Internal)));
    assert!(function_override_matches(&sup, &fun("f", Visibility::Public)));
    assert!(!function_override_matches(&sup, &fun("f", Visibility::Private)));
}

#[test]
fn internal_base_rejects_protected() {
    let sup = fun("f", Visibility::Internal);
    assert!(!function_override_matches(&sup, &fun("f", Visibility::Protected)));
    assert!(function_override_matches(&sup, &fun("f", Visibility::Internal)));
    assert!(function_override_matches(&sup, &fun("f", Visibility::Public)));
}

#[test]
fn public_base_accepts_only_public() {
    let sup = fun("f", Visibility::Public);
    assert!(function_override_matches(&sup, &fun("f", Visibility::Public)));
    assert!(!function_override_matches(&sup, &fun("f", Visibility::Internal)));
    assert!(!function_override_matches(&sup, &fun("f", Visibility::Protected)));
}

// === Property matching ===

#[test]
fn var_base_rejects_val_override() {
    let sup = prop("count", Visibility::Public).with_flags(MemberFlags::VAR);
    let sub = prop("count", Visibility::Public);
    assert!(!property_override_matches(&sup, &sub));
}

#[test]
fn val_base_accepts_var_override() {
    let sup = prop("count", Visibility::Public);
    let sub = prop("count", Visibility::Public).with_flags(MemberFlags::VAR);
    assert!(property_override_matches(&sup, &sub));
}

#[test]
fn property_receiver_and_arity_must_agree() {
    let sup = prop("size", Visibility::Public).with_receiver("kotlin/collections/List");
    assert!(!property_override_matches(&sup, &prop("size", Visibility::Public)));
    assert!(property_override_matches(
        &sup,
        &prop("size", Visibility::Public).with_receiver("kotlin/collections/List"),
    ));

    let sup = prop("size", Visibility::Public).with_type_params(1);
    assert!(!property_override_matches(&sup, &prop("size", Visibility::Public)));
}

// === Class-level scan ===

#[test]
fn functions_and_properties_are_checked_independently() {
    // Base function named "size" does not match a candidate property "size".
    let base = class_with_fn(fun("size", Visibility::Public));
    let sub = class_with_prop(prop("size", Visibility::Public));
    assert!(!OverridesChecker::for_class(&base).has_override_matching_members(&sub));
}

#[test]
fn any_single_match_suffices() {
    let base = ClassSnapshot::new("test/Base")
        .with_functions([
            fun("a", Visibility::Public).with_params(["X"]),
            fun("b", Visibility::Protected),
        ])
        .with_properties([prop("p", Visibility::Public)]);
    // Candidate only matches the property.
    let sub = ClassSnapshot::new("test/Sub")
        .with_functions([fun("a", Visibility::Public).with_params(["Y"])])
        .with_properties([prop("p", Visibility::Public)]);
    assert!(OverridesChecker::for_class(&base).has_override_matching_members(&sub));
}

#[test]
fn overridable_base_member_with_no_counterpart_does_not_match() {
    let base = class_with_fn(fun("render", Visibility::Public));
    let sub = ClassSnapshot::new("test/Sub");
    assert!(!OverridesChecker::for_class(&base).has_override_matching_members(&sub));
}

// === Visibility lattice properties ===

mod proptest_visibility {
    use crate::meta::Visibility;
    use proptest::prelude::*;

    fn any_visibility() -> impl Strategy<Value = Visibility> {
        prop_oneof![
            Just(Visibility::Private),
            Just(Visibility::Protected),
            Just(Visibility::Internal),
            Just(Visibility::Public),
        ]
    }

    proptest! {
        #[test]
        fn non_private_is_reflexive(vis in any_visibility()) {
            if vis != Visibility::Private {
                prop_assert!(vis.can_override_with(vis));
            }
        }

        #[test]
        fn widening_is_transitive(
            a in any_visibility(),
            b in any_visibility(),
            c in any_visibility(),
        ) {
            if a.can_override_with(b) && b.can_override_with(c) {
                prop_assert!(a.can_override_with(c));
            }
        }

        #[test]
        fn nothing_overrides_out_of_private(vis in any_visibility()) {
            prop_assert!(!Visibility::Private.can_override_with(vis));
        }

        #[test]
        fn overriding_never_narrows(a in any_visibility(), b in any_visibility()) {
            if a.can_override_with(b) {
                prop_assert!(b >= a);
            }
        }
    }
}
