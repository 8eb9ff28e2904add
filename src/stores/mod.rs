pub mod cart;
pub mod keyed;
pub mod order;
