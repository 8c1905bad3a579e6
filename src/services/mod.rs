pub mod assignments;
pub mod customers;
pub mod orders;
pub mod products;
pub mod stores;
pub mod upload_history;

pub use assignments::AssignmentService;
pub use customers::CustomerService;
pub use orders::OrderService;
pub use products::ProductCatalogService;
pub use stores::StoreService;
pub use upload_history::UploadHistoryService;
