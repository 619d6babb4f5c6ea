pub mod cart;
pub mod checkout;
pub mod models;
pub mod session;
pub mod store;
pub mod stream_list;

pub use models::{Entry, EntryId};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use stream_list::StreamList;
