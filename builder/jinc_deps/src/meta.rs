//! Class member metadata model.
//!
//! Immutable snapshots of a JVM-visible class's declared members, as
//! produced by the external metadata provider. A snapshot is never mutated
//! after construction; when the underlying class changes, the provider
//! produces a fresh snapshot under a new metadata version.
//!
//! Member attribute bits (final / suspend / var) are packed into
//! [`MemberFlags`] so a member carries one word of modifiers plus its
//! visibility, mirroring how class-file metadata encodes them.

use std::fmt;

use bitflags::bitflags;
use smallvec::SmallVec;

/// Source-language visibility of a class member.
///
/// Ordered from narrowest to widest; the override rule in
/// [`can_override_with`](Visibility::can_override_with) is *not* the full
/// order (there is no widening path out of `Private`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Private,
    Protected,
    Internal,
    Public,
}

impl Visibility {
    /// Whether a member with visibility `overriding` may override a base
    /// member with visibility `self`.
    ///
    /// An override may keep or widen visibility, never narrow it. A private
    /// base member is invisible to subclasses, so nothing overrides it.
    #[inline]
    pub const fn can_override_with(self, overriding: Visibility) -> bool {
        match self {
            Visibility::Protected => matches!(
                overriding,
                Visibility::Protected | Visibility::Internal | Visibility::Public
            ),
            Visibility::Internal => {
                matches!(overriding, Visibility::Internal | Visibility::Public)
            }
            Visibility::Public => matches!(overriding, Visibility::Public),
            Visibility::Private => false,
        }
    }

    /// Check for `Private` without a full match at call sites.
    #[inline]
    pub const fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Internal => write!(f, "internal"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

bitflags! {
    /// Packed member attribute bits.
    ///
    /// Computed once by the metadata provider, never recomputed.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct MemberFlags: u8 {
        /// Member modality is final (not overridable).
        const FINAL = 1 << 0;
        /// Function carries the suspend (cooperative-yield) marker.
        const SUSPEND = 1 << 1;
        /// Property is mutable (`var` rather than `val`).
        const VAR = 1 << 2;
    }
}

impl MemberFlags {
    #[inline]
    pub const fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    #[inline]
    pub const fn is_suspend(self) -> bool {
        self.contains(Self::SUSPEND)
    }

    #[inline]
    pub const fn is_var(self) -> bool {
        self.contains(Self::VAR)
    }
}

impl Default for MemberFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Opaque type token.
///
/// The compatibility predicates only ever compare these for equality; the
/// metadata provider is responsible for producing tokens that are equal
/// exactly when the underlying types are (e.g. fully-resolved JVM
/// descriptors).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(token: impl Into<String>) -> Self {
        TypeRef(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(token: &str) -> Self {
        TypeRef::new(token)
    }
}

impl From<String> for TypeRef {
    fn from(token: String) -> Self {
        TypeRef(token)
    }
}

/// Ordered value-parameter type list.
///
/// Members rarely have more than a handful of parameters, so the common
/// case stays inline.
pub type ParamTypes = SmallVec<[TypeRef; 4]>;

/// Snapshot of one declared function.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionMember {
    pub name: String,
    pub visibility: Visibility,
    pub flags: MemberFlags,
    /// Value-parameter types in declaration order.
    pub param_types: ParamTypes,
    /// Extension-receiver type, if the function is an extension.
    pub receiver: Option<TypeRef>,
    /// Number of declared type parameters.
    pub type_param_count: usize,
}

impl FunctionMember {
    /// A public, open, zero-parameter function. Refine with the `with_*`
    /// builders.
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        FunctionMember {
            name: name.into(),
            visibility,
            flags: MemberFlags::empty(),
            param_types: ParamTypes::new(),
            receiver: None,
            type_param_count: 0,
        }
    }

    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TypeRef>,
    {
        self.param_types = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<TypeRef>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_type_params(mut self, count: usize) -> Self {
        self.type_param_count = count;
        self
    }
}

/// Snapshot of one declared property.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyMember {
    pub name: String,
    pub visibility: Visibility,
    pub flags: MemberFlags,
    /// Extension-receiver type, if the property is an extension.
    pub receiver: Option<TypeRef>,
    /// Number of declared type parameters.
    pub type_param_count: usize,
}

impl PropertyMember {
    /// A public, open, read-only property. Refine with the `with_*`
    /// builders.
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        PropertyMember {
            name: name.into(),
            visibility,
            flags: MemberFlags::empty(),
            receiver: None,
            type_param_count: 0,
        }
    }

    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<TypeRef>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_type_params(mut self, count: usize) -> Self {
        self.type_param_count = count;
        self
    }
}

/// Immutable view of a class's JVM-visible members.
///
/// Produced and versioned by the external metadata provider; recomputed
/// whenever the class's metadata changes.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassSnapshot {
    pub name: String,
    /// Whether the class itself is final (cannot be subclassed).
    pub is_final: bool,
    /// Declared functions, in declaration order.
    pub functions: Vec<FunctionMember>,
    /// Declared properties, in declaration order.
    pub properties: Vec<PropertyMember>,
}

impl ClassSnapshot {
    /// An open class with no members. Populate with the `with_*` builders.
    pub fn new(name: impl Into<String>) -> Self {
        ClassSnapshot {
            name: name.into(),
            is_final: false,
            functions: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn sealed(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_functions(mut self, functions: impl IntoIterator<Item = FunctionMember>) -> Self {
        self.functions = functions.into_iter().collect();
        self
    }

    pub fn with_properties(
        mut self,
        properties: impl IntoIterator<Item = PropertyMember>,
    ) -> Self {
        self.properties = properties.into_iter().collect();
        self
    }
}
