//! # notewise-form
//!
//! The profile-form tag editor, modeled as data first: each tag is a plain
//! record in a list owned by the form state, and the visible markup plus
//! hidden submission fields are derived from that list. This keeps the
//! state and its rendering testable independently of any browser.

pub mod form;
pub mod tag;

pub use form::ProfileFormState;
pub use tag::{LanguageTag, SkillTag, TagId};
