// Entity Models
//
// - BlacklistEntry: username + category, identity is the case-insensitive username
// - BlacklistRegistry: the in-memory store every directive is applied to
// - CategoryType: fixed offense vocabulary and its display ranking

pub mod blacklist;
pub mod category;

pub use blacklist::{same_username, BlacklistEntry, BlacklistRegistry};
pub use category::{category_rank, CategoryType};
