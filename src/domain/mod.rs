//! Domain model for the discount engine

pub mod cart;
pub mod discount;
pub mod value_objects;

pub use cart::{apply_discount, LineItem};
pub use discount::{DiscountCode, ValidatedDiscount};
pub use value_objects::Percent;
