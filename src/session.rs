/// Scene runner.
pub mod runner;
