//! Policy synthesis (statement accumulation and resource naming)

pub mod policy_builder;

pub use policy_builder::PolicyBuilder;
