//! Integration tests for ansimirror

mod helpers;

mod catalog_test;
mod cli_test;
mod render_test;
mod server_test;
