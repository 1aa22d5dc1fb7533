//! Item deposit and CRUD.

pub mod service;

pub use service::ItemService;
