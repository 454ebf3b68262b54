//! Text extraction helpers
//!
//! Stateless functions that pull structured signals out of free text taken
//! from tickets, PR bodies and comments:
//!
//! - [`clean_text`] strips markup noise
//! - [`extract_ticket_id`] / [`extract_ticket_ids`] / [`extract_ticket_keys`] find
//!   `PROJECT-123` ids
//! - [`extract_github_refs`] finds commit and PR links for one repository
//! - [`extract_keywords`] ranks candidate search phrases
//!
//! None of these return errors. Bad input yields an empty result.

mod keywords;
mod refs;
mod text;

pub use keywords::extract_keywords;
pub use refs::{extract_github_refs, GithubRefs};
pub(crate) use refs::normalize_repo;
pub use text::{
    clean_text, extract_ticket_id, extract_ticket_ids, extract_ticket_keys, find_ticket_keys,
};
