pub mod dates;
pub mod grid;
pub mod layout;
