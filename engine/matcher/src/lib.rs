//! The `feedsift_engine_matcher` crate contains the entry filtering logic:
//! the rule set parser, the block/keep Matcher and the rule syntax validator.

pub mod accessor;
pub mod cache;
pub mod config;
pub mod error;
pub mod matcher;
pub mod regex;
pub mod validator;
