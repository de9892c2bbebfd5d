//! Predefined typed actions
//!
//! Each submodule covers one service. Use them with
//! [`Tr064Client::execute`](crate::Tr064Client::execute):
//!
//! ```rust,ignore
//! use tr064_api::operations::hosts::get_host_number_of_entries;
//!
//! let count = client.execute(&get_host_number_of_entries())?;
//! ```

pub mod device_info;
pub mod hosts;
