//! Orchestration: dispatcher, validators, and comment publishing

pub mod comment;
pub mod dispatcher;
pub mod validators;

pub use comment::publish_comment;
pub use dispatcher::{check, SKIP_UNRELATED};
pub use validators::{AdapterValidator, BotValidator, PluginValidator, ValidationContext, Validator};
