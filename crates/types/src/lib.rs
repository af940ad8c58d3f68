//! Component metadata and deployment-tree model for Arbor
//!
//! This crate carries the pure data the engine operates on:
//!
//! - **Names** ([`ComponentName`], [`ModuleName`], [`ApplicationName`],
//!   [`ContractName`]): newtype identifiers supplied by the deployment
//!   pipeline.
//! - **Contracts** ([`ContractType`], [`ContractLoader`]): the loaded shape
//!   of a published contract, including its ancestor contracts, behind a
//!   loading capability owned by the external metadata layer.
//! - **Components** ([`ComponentDescriptor`]): one deployable component's
//!   declared views, read-only to the engine.
//! - **Scopes** ([`ScopeTree`], [`ScopeId`]): the hierarchy of nested
//!   deployment scopes, an arena of nodes addressed by stable ids so that
//!   resolution can treat the tree as a snapshot.

#![deny(unsafe_code)]

mod component;
mod contract;
mod error;
mod ids;
mod scope;

pub use component::*;
pub use contract::*;
pub use error::*;
pub use ids::*;
pub use scope::*;
