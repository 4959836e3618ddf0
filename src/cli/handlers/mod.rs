//! Shared command-handler patterns

mod list;

pub use list::{print_ack, run_list_command};
