//! User interface rendering and input handling.
//!
//! - **renderer**: Full-screen crossterm renderer and a plain-text renderer
//! - **keymapper**: Keyboard events to prompt actions
//! - **input_field**: Editable prompt line

pub mod keymapper;
pub mod renderer;
pub mod input_field;

pub use keymapper::{InputAction, KeyMapper};
pub use renderer::{Renderer, TextRenderer};
pub use input_field::InputField;
