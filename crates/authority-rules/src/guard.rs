// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Guard predicates attached to rules.
//!
//! A [`Guard`] is a condition evaluated against the authorization context and
//! zero to three resource instances. Its variant fixes its arity: evaluation
//! hands the guard exactly that many leading arguments and ignores the rest.
//! Supplying fewer arguments than the arity is an error; nothing is padded.
//!
//! Guards come in three flavours:
//!
//! - plain (`unary`, `binary`, ...): closures over `&dyn Resource` returning `bool`
//! - fallible (`try_unary`, ...): closures returning `Result<bool, E>`
//! - typed (`for_type`, `for_types`): closures over concrete [`ResourceKind`]
//!   types; a mismatched argument yields [`GuardError::UnexpectedResource`].
//!   The check is on the Rust type, not the type name, so a dynamic resource
//!   reporting the same name as the kind is still rejected.

use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, GuardError, Result};
use crate::resource::{Resource, ResourceKind, ResourceType};

type NullaryFn<C> = dyn Fn(&C) -> Result<bool> + Send + Sync;
type UnaryFn<C> = dyn Fn(&C, &dyn Resource) -> Result<bool> + Send + Sync;
type BinaryFn<C> = dyn Fn(&C, &dyn Resource, &dyn Resource) -> Result<bool> + Send + Sync;
type TernaryFn<C> =
	dyn Fn(&C, &dyn Resource, &dyn Resource, &dyn Resource) -> Result<bool> + Send + Sync;

/// A condition deciding whether a rule's polarity applies.
///
/// `C` is the authorization context type (e.g. the current actor). It is passed
/// to every guard by reference and never inspected by the rule itself.
pub enum Guard<C = ()> {
	Nullary(Arc<NullaryFn<C>>),
	Unary(Arc<UnaryFn<C>>),
	Binary(Arc<BinaryFn<C>>),
	Ternary(Arc<TernaryFn<C>>),
}

impl<C: 'static> Guard<C> {
	/// A guard that only looks at the context.
	pub fn nullary<F>(f: F) -> Self
	where
		F: Fn(&C) -> bool + Send + Sync + 'static,
	{
		Self::Nullary(Arc::new(move |ctx: &C| -> Result<bool> { Ok(f(ctx)) }))
	}

	pub fn unary<F>(f: F) -> Self
	where
		F: Fn(&C, &dyn Resource) -> bool + Send + Sync + 'static,
	{
		Self::Unary(Arc::new(
			move |ctx: &C, a: &dyn Resource| -> Result<bool> { Ok(f(ctx, a)) },
		))
	}

	pub fn binary<F>(f: F) -> Self
	where
		F: Fn(&C, &dyn Resource, &dyn Resource) -> bool + Send + Sync + 'static,
	{
		Self::Binary(Arc::new(
			move |ctx: &C, a: &dyn Resource, b: &dyn Resource| -> Result<bool> { Ok(f(ctx, a, b)) },
		))
	}

	pub fn ternary<F>(f: F) -> Self
	where
		F: Fn(&C, &dyn Resource, &dyn Resource, &dyn Resource) -> bool + Send + Sync + 'static,
	{
		Self::Ternary(Arc::new(
			move |ctx: &C, a: &dyn Resource, b: &dyn Resource, c: &dyn Resource| -> Result<bool> {
				Ok(f(ctx, a, b, c))
			},
		))
	}

	/// A context-only guard that may fail.
	pub fn try_nullary<F, E>(f: F) -> Self
	where
		F: Fn(&C) -> std::result::Result<bool, E> + Send + Sync + 'static,
		E: Into<BoxError>,
	{
		Self::Nullary(Arc::new(move |ctx: &C| -> Result<bool> {
			f(ctx).map_err(GuardError::failed)
		}))
	}

	pub fn try_unary<F, E>(f: F) -> Self
	where
		F: Fn(&C, &dyn Resource) -> std::result::Result<bool, E> + Send + Sync + 'static,
		E: Into<BoxError>,
	{
		Self::Unary(Arc::new(
			move |ctx: &C, a: &dyn Resource| -> Result<bool> {
				f(ctx, a).map_err(GuardError::failed)
			},
		))
	}

	pub fn try_binary<F, E>(f: F) -> Self
	where
		F: Fn(&C, &dyn Resource, &dyn Resource) -> std::result::Result<bool, E>
			+ Send
			+ Sync
			+ 'static,
		E: Into<BoxError>,
	{
		Self::Binary(Arc::new(
			move |ctx: &C, a: &dyn Resource, b: &dyn Resource| -> Result<bool> {
				f(ctx, a, b).map_err(GuardError::failed)
			},
		))
	}

	pub fn try_ternary<F, E>(f: F) -> Self
	where
		F: Fn(&C, &dyn Resource, &dyn Resource, &dyn Resource) -> std::result::Result<bool, E>
			+ Send
			+ Sync
			+ 'static,
		E: Into<BoxError>,
	{
		Self::Ternary(Arc::new(
			move |ctx: &C, a: &dyn Resource, b: &dyn Resource, c: &dyn Resource| -> Result<bool> {
				f(ctx, a, b, c).map_err(GuardError::failed)
			},
		))
	}

	/// A single-argument guard over a concrete resource type.
	///
	/// ```
	/// use authority_rules::{Guard, ResourceKind};
	///
	/// struct Post {
	///     author_id: u64,
	/// }
	///
	/// impl ResourceKind for Post {
	///     const RESOURCE_TYPE: &'static str = "post";
	/// }
	///
	/// let guard = Guard::for_type(|user_id: &u64, post: &Post| post.author_id == *user_id);
	/// assert!(guard.evaluate(&7, &[&Post { author_id: 7 }]).unwrap());
	/// ```
	pub fn for_type<T, F>(f: F) -> Self
	where
		T: ResourceKind,
		F: Fn(&C, &T) -> bool + Send + Sync + 'static,
	{
		Self::Unary(Arc::new(
			move |ctx: &C, a: &dyn Resource| -> Result<bool> { Ok(f(ctx, downcast::<T>(a, 0)?)) },
		))
	}

	/// A two-argument guard over concrete resource types.
	pub fn for_types<A, B, F>(f: F) -> Self
	where
		A: ResourceKind,
		B: ResourceKind,
		F: Fn(&C, &A, &B) -> bool + Send + Sync + 'static,
	{
		Self::Binary(Arc::new(
			move |ctx: &C, a: &dyn Resource, b: &dyn Resource| -> Result<bool> {
				Ok(f(ctx, downcast::<A>(a, 0)?, downcast::<B>(b, 1)?))
			},
		))
	}
}

impl<C> Guard<C> {
	/// Number of resource arguments this guard consumes.
	pub fn arity(&self) -> usize {
		match self {
			Self::Nullary(_) => 0,
			Self::Unary(_) => 1,
			Self::Binary(_) => 2,
			Self::Ternary(_) => 3,
		}
	}

	/// Evaluates the guard against `ctx` and the leading `arity()` arguments.
	///
	/// Errors raised by the guard are returned unchanged.
	pub fn evaluate(&self, ctx: &C, args: &[&dyn Resource]) -> Result<bool> {
		match (self, args) {
			(Self::Nullary(f), _) => f(ctx),
			(Self::Unary(f), [a, ..]) => f(ctx, *a),
			(Self::Binary(f), [a, b, ..]) => f(ctx, *a, *b),
			(Self::Ternary(f), [a, b, c, ..]) => f(ctx, *a, *b, *c),
			_ => Err(GuardError::MissingArguments {
				expected: self.arity(),
				supplied: args.len(),
			}),
		}
	}
}

fn downcast<T: ResourceKind>(resource: &dyn Resource, position: usize) -> Result<&T> {
	resource
		.downcast_ref::<T>()
		.ok_or_else(|| GuardError::UnexpectedResource {
			position,
			expected: ResourceType::of::<T>(),
			found: resource.resource_type(),
		})
}

impl<C> Clone for Guard<C> {
	fn clone(&self) -> Self {
		match self {
			Self::Nullary(f) => Self::Nullary(Arc::clone(f)),
			Self::Unary(f) => Self::Unary(Arc::clone(f)),
			Self::Binary(f) => Self::Binary(Arc::clone(f)),
			Self::Ternary(f) => Self::Ternary(Arc::clone(f)),
		}
	}
}

impl<C> fmt::Debug for Guard<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Guard")
			.field("arity", &self.arity())
			.finish_non_exhaustive()
	}
}
