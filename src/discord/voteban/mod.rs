// Discord side of votebans: the context-menu command, the poll message
// and button handling.

pub mod commands;
pub mod interactions;
pub mod poll_render;
