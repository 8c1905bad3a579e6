pub mod assigned_history;
pub mod customer;
pub mod order;
pub mod product;
pub mod store;
pub mod upload_history;

pub use assigned_history::Entity as AssignedHistory;
pub use customer::Entity as Customer;
pub use order::Entity as Order;
pub use product::Entity as Product;
pub use store::Entity as Store;
pub use upload_history::Entity as UploadHistory;
