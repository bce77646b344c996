// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Declarative rule definitions.
//!
//! A [`RuleDefinition`] is the data half of a [`Rule`]: polarity, action and
//! resource type. Hosts can keep definitions in JSON (or any serde format),
//! build rules from them and attach guards in code. Going the other way,
//! [`Rule::definition`] gives a snapshot suitable for audit logs.
//!
//! ```json
//! { "effect": "deny", "action": "delete", "resource": "invoice" }
//! ```

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::resource::ResourceType;
use crate::rule::Rule;

/// Polarity of a rule in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
	Allow,
	Deny,
}

impl Effect {
	/// The rule behavior flag for this effect.
	pub fn behavior(self) -> bool {
		matches!(self, Self::Allow)
	}
}

impl From<bool> for Effect {
	fn from(behavior: bool) -> Self {
		if behavior {
			Self::Allow
		} else {
			Self::Deny
		}
	}
}

/// Serializable description of a rule without its guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
	pub effect: Effect,
	pub action: Action,
	pub resource: ResourceType,
}

impl RuleDefinition {
	pub fn new(
		effect: Effect,
		action: impl Into<Action>,
		resource: impl Into<ResourceType>,
	) -> Self {
		Self {
			effect,
			action: action.into(),
			resource: resource.into(),
		}
	}

	/// Builds an unguarded rule from this definition.
	pub fn into_rule<C>(self) -> Rule<C> {
		Rule::new(self.effect.behavior(), self.action, self.resource)
	}
}

impl<C> From<&Rule<C>> for RuleDefinition {
	fn from(rule: &Rule<C>) -> Self {
		Self {
			effect: Effect::from(rule.behavior()),
			action: rule.action().clone(),
			resource: rule.resource_type(),
		}
	}
}

impl<C> From<RuleDefinition> for Rule<C> {
	fn from(definition: RuleDefinition) -> Self {
		definition.into_rule()
	}
}
