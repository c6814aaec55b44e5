//! Database-facing operations behind the GraphQL resolvers.
//!
//! Each function takes the connection plus plain arguments and returns
//! a domain `Result`; the resolvers only translate between the wire
//! types and these calls.

pub mod todos;
pub mod users;
