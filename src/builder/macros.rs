//! Macros for ergonomic state machine construction.

/// Generate a state enum and its `StateId` implementation.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`,
/// `Serialize` and `Deserialize`; `variants()` lists the variants in
/// declaration order.
///
/// # Example
///
/// ```
/// use tempo_fsm::core::StateId;
/// use tempo_fsm::state_enum;
///
/// state_enum! {
///     pub enum Screen {
///         Title,
///         Playing,
///         Paused,
///     }
/// }
///
/// assert_eq!(Screen::variants(), vec![Screen::Title, Screen::Playing, Screen::Paused]);
/// assert_eq!(Screen::Paused.name(), "Paused");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateId for $name {
            fn variants() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),*]
            }

            fn name(&self) -> &str {
                match *self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
