pub mod game;
pub mod result;
pub mod state;
pub mod title;
