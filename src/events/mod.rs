pub mod keyboard;
pub mod pointer;

pub use keyboard::{dismiss_selection, wire_global_keydown};
pub use pointer::{wire_input_handlers, InputWiring};
