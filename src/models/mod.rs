pub mod billing;
pub mod cart;
pub mod item;
pub mod order;
