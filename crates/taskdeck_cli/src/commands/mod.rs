//! Subcommand handlers: one module per screen (board list, calendar) plus
//! the add/edit/delete mutations.

pub mod cal;
pub mod list;
pub mod task;
