pub mod customer;

pub use customer::{Customer, CustomerTable, NewCustomer};
