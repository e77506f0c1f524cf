pub mod content;
pub mod favorite;
pub mod history;
pub mod progression;
pub mod user;

pub use content::ContentType;
pub use favorite::{FavoriteEntry, NewFavoriteEntry};
pub use history::{HistoryEntry, NewHistoryEntry};
pub use progression::{ProgressionState, RewardAction};
pub use user::User;
