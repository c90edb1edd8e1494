//! Macros for defining kind enums.

/// Defines a fieldless enum with a stable `snake_case` string form.
///
/// The string form is used both by [`Display`]/[`FromStr`] and by [`serde`],
/// so the values match what the REST API exchanges.
///
/// # Example
///
/// ```rust
/// common::define_kind! {
///     #[doc = "Kind of a bed."]
///     enum Bed {
///         #[doc = "Single bed."]
///         Single = 1,
///
///         #[doc = "King size bed."]
///         KingSize = 2,
///     }
/// }
///
/// assert_eq!(Bed::KingSize.to_string(), "king_size");
/// assert_eq!("single".parse::<Bed>().unwrap(), Bed::Single);
/// assert_eq!(Bed::ALL.len(), 2);
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
/// [`serde`]: crate::private::serde
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[serde(crate = "common::private::serde", rename_all = "snake_case")]
        #[strum(
            crate = "common::private::strum",
            serialize_all = "snake_case"
        )]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}
