// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for guard evaluation.

use thiserror::Error;

use crate::resource::ResourceType;

/// Boxed error raised from inside a fallible guard.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while evaluating a guard.
///
/// Matching queries on a [`Rule`](crate::Rule) are total; only guard evaluation
/// can fail, and failures are returned to the caller unchanged.
#[derive(Debug, Error)]
pub enum GuardError {
	/// The guard declares more parameters than arguments were supplied.
	#[error("guard expects {expected} argument(s) but {supplied} were supplied")]
	MissingArguments { expected: usize, supplied: usize },

	/// A typed guard received a resource that is not its concrete Rust type.
	///
	/// Typed guards downcast, so a dynamic [`Resource`](crate::Resource) that
	/// reports the same type name as the guard's [`ResourceKind`](crate::ResourceKind)
	/// is still rejected; `expected` and `found` can then be equal.
	#[error(
		"guard argument {position} is not the concrete type for resource {expected} (found {found})"
	)]
	UnexpectedResource {
		position: usize,
		expected: ResourceType,
		found: ResourceType,
	},

	/// The guard itself returned an error.
	#[error("guard failed: {0}")]
	Failed(#[source] BoxError),
}

impl GuardError {
	/// Wraps an arbitrary error raised by a guard.
	pub fn failed<E>(err: E) -> Self
	where
		E: Into<BoxError>,
	{
		Self::Failed(err.into())
	}
}

pub type Result<T> = std::result::Result<T, GuardError>;
