pub mod cli;
pub mod commands;
pub mod error;
pub mod fs_utils;
pub mod ini;
pub mod lock;
pub mod paths;
pub mod resolver;
pub mod rewriter;
pub mod switch;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
