mod chrome;
mod command_bar;
mod layout;
mod page;
mod text;

pub use chrome::{debug_text, draw_chrome, status_text};
pub use command_bar::{command_bar_line, draw_command_bar};
pub use layout::{UiLayout, split_layout};
pub use page::{draw_page, page_view_lines, scroll_offset};
pub use text::clip_to_width;
