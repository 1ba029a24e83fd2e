pub mod check;
pub mod config;
pub mod descriptor;
pub mod run;
