pub mod cards;
pub mod common;
pub mod completions;
pub mod data;
pub mod modes;
pub mod show;
pub mod topic;
