#![forbid(unsafe_code)]

//! Environment catalog: a closed, ordered set of named backend environments.
//!
//! An environment type implements [`Environment`], usually through the
//! [`environments!`](crate::environments) macro. [`EnvironmentCatalog`]
//! validates the declared set once and is read-only afterwards.
//!
//! # Invariants
//!
//! 1. A catalog is never empty.
//! 2. Identifying strings are non-empty and unique within the catalog.
//! 3. Declaration order is preserved; the first variant is the default.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | [`CatalogError::Empty`] | `ALL` has no variants | Construction fails |
//! | [`CatalogError::EmptyIdentifier`] | A variant maps to `""` | Construction fails |
//! | [`CatalogError::DuplicateIdentifier`] | Two variants share a string | Construction fails |

use std::collections::HashMap;
use std::fmt;

/// A selectable backend environment.
///
/// Each variant has one identifying string (persisted and shown in the
/// choice header) and a display label (shown on the choice item).
pub trait Environment: Copy + Eq + fmt::Debug + 'static {
    /// Every variant, in declaration order. The first entry is the default.
    const ALL: &'static [Self];

    /// The unique, non-empty identifying string of this variant.
    fn identifier(&self) -> &str;

    /// Label shown on the choice item. Defaults to the identifier.
    fn display_label(&self) -> &str {
        self.identifier()
    }
}

/// Errors detected while validating a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no variants.
    Empty,
    /// A variant's identifying string is empty.
    EmptyIdentifier {
        /// Position of the offending variant.
        index: usize,
    },
    /// Two variants share an identifying string.
    DuplicateIdentifier {
        identifier: String,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "environment catalog has no variants"),
            CatalogError::EmptyIdentifier { index } => {
                write!(f, "environment at index {index} has an empty identifier")
            }
            CatalogError::DuplicateIdentifier {
                identifier,
                first,
                second,
            } => write!(
                f,
                "environments at index {first} and {second} share identifier {identifier:?}"
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Validated, ordered set of environments.
#[derive(Debug, Clone)]
pub struct EnvironmentCatalog<E: Environment> {
    variants: Vec<E>,
}

impl<E: Environment> EnvironmentCatalog<E> {
    /// Build the catalog from `E::ALL`.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_variants(E::ALL.iter().copied())
    }

    /// Build the catalog from an explicit ordered subset of variants.
    pub fn from_variants(variants: impl IntoIterator<Item = E>) -> Result<Self, CatalogError> {
        let variants: Vec<E> = variants.into_iter().collect();
        if variants.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(variants.len());
        for (index, variant) in variants.iter().enumerate() {
            let identifier = variant.identifier();
            if identifier.is_empty() {
                return Err(CatalogError::EmptyIdentifier { index });
            }
            if let Some(&first) = seen.get(identifier) {
                return Err(CatalogError::DuplicateIdentifier {
                    identifier: identifier.to_string(),
                    first,
                    second: index,
                });
            }
            seen.insert(identifier, index);
        }

        Ok(Self { variants })
    }

    /// Variants in catalog order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = E> + '_ {
        self.variants.iter().copied()
    }

    /// Variants in catalog order, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        &self.variants
    }

    /// Number of variants (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// The default variant: the first one declared.
    #[must_use]
    pub fn default_variant(&self) -> E {
        self.variants[0]
    }

    /// Variant at `index` in catalog order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<E> {
        self.variants.get(index).copied()
    }

    /// Look up a variant by its identifying string.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<E> {
        self.iter().find(|v| v.identifier() == identifier)
    }

    /// Position of a variant in catalog order.
    #[must_use]
    pub fn position(&self, variant: E) -> Option<usize> {
        self.variants.iter().position(|v| *v == variant)
    }
}

/// Declare an environment enum and implement [`Environment`] for it.
///
/// Each variant maps to its identifying string, optionally followed by
/// `as "label"` when the choice list should show something else.
///
/// ```
/// envswitch_core::environments! {
///     pub enum Backend {
///         Production => "https://production.server.com/",
///         Staging => "https://staging.server.com/" as "Staging",
///     }
/// }
///
/// use envswitch_core::Environment;
/// assert_eq!(Backend::ALL.len(), 2);
/// assert_eq!(Backend::Staging.display_label(), "Staging");
/// assert_eq!(Backend::Production.display_label(), "https://production.server.com/");
/// ```
#[macro_export]
macro_rules! environments {
    (@label $id:literal) => {
        $id
    };
    (@label $id:literal, $label:literal) => {
        $label
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $id:literal $(as $label:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::catalog::Environment for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn identifier(&self) -> &str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            fn display_label(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::environments!(@label $id $(, $label)?),)+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::environments! {
        enum Tier {
            Alpha => "a",
            Beta => "b" as "Beta tier",
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Clashing {
        One,
        Two,
        Three,
    }

    impl Environment for Clashing {
        const ALL: &'static [Self] = &[Self::One, Self::Two, Self::Three];

        fn identifier(&self) -> &str {
            match self {
                Self::One => "same",
                Self::Two => "other",
                Self::Three => "same",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Nothing {}

    impl Environment for Nothing {
        const ALL: &'static [Self] = &[];

        fn identifier(&self) -> &str {
            match *self {}
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Blank {
        Named,
        Unnamed,
    }

    impl Environment for Blank {
        const ALL: &'static [Self] = &[Self::Named, Self::Unnamed];

        fn identifier(&self) -> &str {
            match self {
                Self::Named => "named",
                Self::Unnamed => "",
            }
        }
    }

    #[test]
    fn preserves_declaration_order() {
        let catalog = EnvironmentCatalog::<Tier>::new().unwrap();
        assert_eq!(catalog.as_slice(), &[Tier::Alpha, Tier::Beta]);
        assert_eq!(catalog.default_variant(), Tier::Alpha);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn labels_default_to_identifier() {
        assert_eq!(Tier::Alpha.display_label(), "a");
        assert_eq!(Tier::Beta.display_label(), "Beta tier");
        assert_eq!(Tier::Beta.identifier(), "b");
    }

    #[test]
    fn lookup_by_identifier() {
        let catalog = EnvironmentCatalog::<Tier>::new().unwrap();
        assert_eq!(catalog.find("b"), Some(Tier::Beta));
        assert_eq!(catalog.find("Beta tier"), None);
        assert_eq!(catalog.position(Tier::Beta), Some(1));
        assert_eq!(catalog.get(2), None);
        assert_eq!(catalog.default_variant().identifier(), "a");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = EnvironmentCatalog::<Nothing>::new().unwrap_err();
        assert_eq!(err, CatalogError::Empty);
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let err = EnvironmentCatalog::<Clashing>::new().unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateIdentifier {
                identifier: "same".into(),
                first: 0,
                second: 2,
            }
        );
        assert!(err.to_string().contains("\"same\""));
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let err = EnvironmentCatalog::<Blank>::new().unwrap_err();
        assert_eq!(err, CatalogError::EmptyIdentifier { index: 1 });
    }

    #[test]
    fn subset_catalog_skips_clash() {
        let catalog =
            EnvironmentCatalog::from_variants([Clashing::Two, Clashing::Three]).unwrap();
        assert_eq!(catalog.default_variant(), Clashing::Two);
    }
}
