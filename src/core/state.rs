//! State identifier trait for state machine states.
//!
//! A state machine is parameterised over a finite, enumerable set of
//! identifiers. Every identifier gets exactly one slot when the machine is
//! built, so the full domain must be known up front.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values that name a state.
///
/// # Required Traits
///
/// - `Copy`: identifiers are passed around by value in callbacks and queries
/// - `Eq` + `Hash`: identifiers key the slot lookup table
/// - `Debug`: identifiers appear in diagnostics
/// - `Send` + `'static`: machines can be shared with a runner on another thread
///
/// # Example
///
/// ```rust
/// use tempo_fsm::core::StateId;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Panel {
///     Menu,
///     Settings,
/// }
///
/// impl StateId for Panel {
///     fn variants() -> Vec<Self> {
///         vec![Self::Menu, Self::Settings]
///     }
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Menu => "Menu",
///             Self::Settings => "Settings",
///         }
///     }
/// }
///
/// assert_eq!(Panel::variants().len(), 2);
/// assert_eq!(Panel::Settings.name(), "Settings");
/// ```
pub trait StateId: Copy + Eq + Hash + Debug + Send + 'static {
    /// Every value of the domain, in declaration order.
    ///
    /// Construction of a machine fails when this is empty.
    fn variants() -> Vec<Self>;

    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
