pub mod filter;
pub mod theme;
pub mod todo;
pub mod view;
