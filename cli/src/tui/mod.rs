mod events;
mod run;
mod terminal;
mod ui;

pub use run::run;
pub use terminal::check_tui_support;
