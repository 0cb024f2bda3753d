//! Round resolution: the dominance rule, damage formula, combo
//! multiplier, and the bounded round history.

pub mod combo;
pub mod history;
pub mod resolve;
pub mod result;

pub use combo::ComboTracker;
pub use history::RoundHistory;
pub use resolve::{resolve_round, Resolution, RoundContext};
pub use result::{RoundResult, RoundWinner, TriggeredEffect};
