// Adapters layer: everything between raw user input and the pricing engine,
// and between a finished quote and what the user sees or sends.

pub mod input;
pub mod message;
pub mod presentation;
