pub mod cli;
pub mod repl;
pub mod view;
