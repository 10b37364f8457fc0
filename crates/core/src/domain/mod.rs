pub mod course;
pub mod customer;
pub mod identity;
pub mod lesson;
pub mod module;
