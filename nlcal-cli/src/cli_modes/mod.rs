mod cli_mode;
mod delete_mode;
mod editor_utils;
mod list_mode;
mod model_command;
mod use_color;
mod write_mode;

pub use cli_mode::CliModeResult;
pub use delete_mode::delete_mode;
pub use list_mode::list_mode;
pub use use_color::use_color;
pub use write_mode::write_mode;
