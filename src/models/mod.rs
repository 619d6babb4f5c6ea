pub mod cart_item;
pub mod entry;
pub mod product;

pub use cart_item::CartItem;
pub use entry::{Entry, EntryId};
pub use product::Product;
