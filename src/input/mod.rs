mod handler;
pub mod keymap;
