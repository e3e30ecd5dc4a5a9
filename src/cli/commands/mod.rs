pub mod templates;
pub mod validate;

pub use templates::TemplateCommands;
