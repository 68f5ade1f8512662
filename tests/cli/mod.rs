pub mod support;

mod catalog;
mod errors;
mod init;
mod recalc;
mod scoring;
