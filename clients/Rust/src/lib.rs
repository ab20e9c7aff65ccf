//! # LP API Client
//!
//! A Rust client SDK for the LP solve REST API.
//!
//! ## Example
//!
//! ```no_run
//! use lp_api_sdk::{Constraint, LpClient, SolveRequestBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LpClient::new("http://localhost:9000")?;
//!
//!     let request = SolveRequestBuilder::new()
//!         .add_variable("x", Some(0.0), None)
//!         .add_variable("y", Some(0.0), None)
//!         .add_constraint(Constraint::less_eq([("x", 1.0), ("y", 1.0)], 10.0))
//!         .maximize([("x", 1.0), ("y", 1.0)])
//!         .build()?;
//!
//!     let result = client.solve(request).await?;
//!     println!("{:?}: {:?}", result.status, result.variables);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod client;
pub mod error;
pub mod types;

pub use builder::SolveRequestBuilder;
pub use client::LpClient;
pub use error::{LpApiError, Result};
pub use types::{
    Constraint, Objective, SolveRequest, SolveResult, SolversResponse, Status, VariableBound,
};
