pub mod config;
pub mod resolve;
pub mod run;
pub mod simulate;
