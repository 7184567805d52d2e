// Business domains
pub mod customers;
