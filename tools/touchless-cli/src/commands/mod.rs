pub mod check;
pub mod config;
pub mod replay;
pub mod run;
