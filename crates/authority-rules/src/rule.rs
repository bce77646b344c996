// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Allow/deny rules.
//!
//! A [`Rule`] pairs a polarity with an action and a resource, and optionally a
//! [`Guard`]. Evaluation happens in two steps:
//!
//! 1. **Relevance**: [`Rule::is_relevant`] checks the action and resource type
//!    without looking at any instance.
//! 2. **Decision**: [`Rule::is_allowed`] runs the guard (if any) against the
//!    concrete instances and folds the result with the rule's polarity.
//!
//! A guard answers "does this rule apply?". For a privilege the answer is the
//! decision. For a restriction it is inverted: an applicable restriction
//! denies, an inapplicable one has nothing to block.

use tracing::{debug, instrument, warn};

use crate::action::{Action, IntoActions};
use crate::definition::RuleDefinition;
use crate::error::Result;
use crate::guard::Guard;
use crate::resource::{Resource, ResourceMatcher, ResourceRef, ResourceType};

/// A single allow or deny rule.
///
/// `C` is the authorization context handed to the guard.
pub struct Rule<C = ()> {
	behavior: bool,
	action: Action,
	resource: ResourceMatcher,
	guard: Option<Guard<C>>,
}

impl<C> Rule<C> {
	/// Creates a rule. `behavior` is `true` for a privilege, `false` for a
	/// restriction.
	pub fn new(
		behavior: bool,
		action: impl Into<Action>,
		resource: impl Into<ResourceMatcher>,
	) -> Self {
		Self {
			behavior,
			action: action.into(),
			resource: resource.into(),
			guard: None,
		}
	}

	/// Creates a rule that allows `action` on `resource`.
	pub fn privilege(action: impl Into<Action>, resource: impl Into<ResourceMatcher>) -> Self {
		Self::new(true, action, resource)
	}

	/// Creates a rule that denies `action` on `resource`.
	pub fn restriction(action: impl Into<Action>, resource: impl Into<ResourceMatcher>) -> Self {
		Self::new(false, action, resource)
	}

	/// Builder: set the initial guard.
	pub fn with_guard(mut self, guard: Guard<C>) -> Self {
		self.guard = Some(guard);
		self
	}

	pub fn behavior(&self) -> bool {
		self.behavior
	}

	pub fn is_privilege(&self) -> bool {
		self.behavior
	}

	pub fn is_restriction(&self) -> bool {
		!self.behavior
	}

	pub fn action(&self) -> &Action {
		&self.action
	}

	pub fn resource(&self) -> &ResourceMatcher {
		&self.resource
	}

	/// The type this rule governs. Instance rules report the instance's type.
	pub fn resource_type(&self) -> ResourceType {
		self.resource.resource_type()
	}

	pub fn guard(&self) -> Option<&Guard<C>> {
		self.guard.as_ref()
	}

	pub fn has_guard(&self) -> bool {
		self.guard.is_some()
	}

	/// Replaces the active guard. The previous guard is dropped, not combined.
	pub fn set_guard(&mut self, guard: Guard<C>) {
		self.guard = Some(guard);
	}

	/// Fluent form of [`Rule::set_guard`].
	pub fn when(&mut self, guard: Guard<C>) -> &mut Self {
		self.set_guard(guard);
		self
	}

	/// Removes the guard, making the rule unconditional again.
	pub fn clear_guard(&mut self) -> Option<Guard<C>> {
		self.guard.take()
	}

	/// Returns true if this rule governs `candidate`.
	pub fn matches_action(&self, candidate: impl Into<Action>) -> bool {
		self.action.matches(&candidate.into())
	}

	/// Returns true if `candidate` resolves to the same type as this rule.
	pub fn matches_resource<'a>(&self, candidate: impl Into<ResourceRef<'a>>) -> bool {
		self.resource_type() == candidate.into().resource_type()
	}

	/// Returns true if the resource matches and any of `actions` matches.
	///
	/// A scalar action is a one-element sequence, so both
	/// `rule.is_relevant("read", "post")` and
	/// `rule.is_relevant(["read", "write"], "post")` work.
	pub fn is_relevant<'a>(
		&self,
		actions: impl IntoActions,
		resource: impl Into<ResourceRef<'a>>,
	) -> bool {
		self.matches_resource(resource)
			&& actions
				.into_actions()
				.iter()
				.any(|a| self.action.matches(a))
	}

	/// Decides whether the rule permits access for `args`.
	///
	/// Without a guard the rule's behavior is the decision. With a guard, a
	/// privilege returns the guard's result and a restriction returns its
	/// negation. Guard errors are propagated unchanged.
	#[instrument(
        level = "debug",
        skip(self, ctx, args),
        fields(
            action = %self.action,
            resource_type = %self.resource_type(),
            behavior = self.behavior,
            args = args.len(),
        )
    )]
	pub fn is_allowed(&self, ctx: &C, args: &[&dyn Resource]) -> Result<bool> {
		let Some(guard) = &self.guard else {
			debug!(allowed = self.behavior, "rule has no guard");
			return Ok(self.behavior);
		};

		let applies = match guard.evaluate(ctx, args) {
			Ok(applies) => applies,
			Err(err) => {
				warn!(arity = guard.arity(), error = %err, "guard evaluation failed");
				return Err(err);
			}
		};

		let allowed = if self.behavior { applies } else { !applies };
		debug!(arity = guard.arity(), applies, allowed, "guard evaluated");
		Ok(allowed)
	}

	/// Serializable snapshot of the rule's polarity, action and resource type.
	pub fn definition(&self) -> RuleDefinition {
		RuleDefinition::from(self)
	}
}

impl<C> Clone for Rule<C> {
	fn clone(&self) -> Self {
		Self {
			behavior: self.behavior,
			action: self.action.clone(),
			resource: self.resource.clone(),
			guard: self.guard.clone(),
		}
	}
}

impl<C> std::fmt::Debug for Rule<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Rule")
			.field("behavior", &self.behavior)
			.field("action", &self.action)
			.field("resource", &self.resource)
			.field("guard", &self.guard)
			.finish()
	}
}
