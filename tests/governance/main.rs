#[path = "../support/mod.rs"]
mod support;

mod history;
