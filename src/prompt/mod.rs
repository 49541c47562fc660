/// Sort-key selection: the fixed `STATE` shortcut or an interactive picker.
pub mod terminal;

pub use terminal::TerminalPicker;

use crate::records::{PeekError, STATE_SORT_KEY};

/// Chooses one sort key out of an ordered list.
pub trait SortKeySelector {
    /// Pick a key from `options`.
    ///
    /// # Errors
    ///
    /// Returns `PeekError::SelectionAborted` or `PeekError::Selection`.
    fn select(&mut self, options: &[String]) -> Result<String, PeekError>;
}

/// Always answers `STATE`, without looking at the options.
///
/// The key is not checked against `options`; a missing `STATE` item is
/// fetched anyway and comes back empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatestState;

impl SortKeySelector for LatestState {
    fn select(&mut self, _options: &[String]) -> Result<String, PeekError> {
        Ok(STATE_SORT_KEY.to_owned())
    }
}
