// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Action identifiers governed by rules.
//!
//! An [`Action`] is either a named operation (`"read"`, `"write"`, ...) or the
//! reserved [`Action::Manage`] wildcard, which a rule uses to cover every
//! action at once. The wildcard is written `"manage"` in string form, and
//! `"manage"` always parses to [`Action::Manage`]: an [`ActionName`] can only be
//! built through [`Action::new`], so `Named` never holds the reserved word.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved action name that matches every action.
pub const MANAGE: &str = "manage";

/// Name of a non-wildcard action. Never equal to [`MANAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionName(String);

impl ActionName {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ActionName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// An operation that can be performed on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
	/// Wildcard: a rule with this action governs every action.
	Manage,
	Named(ActionName),
}

impl Action {
	/// Creates an action from its name, mapping `"manage"` to the wildcard.
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		if name == MANAGE {
			Self::Manage
		} else {
			Self::Named(ActionName(name))
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Manage => MANAGE,
			Self::Named(name) => name.as_str(),
		}
	}

	/// Returns true if this is the wildcard action.
	pub fn is_wildcard(&self) -> bool {
		matches!(self, Self::Manage)
	}

	/// Returns true if a rule governing `self` covers `candidate`.
	///
	/// The relation is not symmetric: `Manage` covers `"read"`, but a rule
	/// governing `"read"` does not cover a `Manage` query.
	pub fn matches(&self, candidate: &Action) -> bool {
		self.is_wildcard() || self == candidate
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::new(s))
	}
}

impl From<&str> for Action {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for Action {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

impl From<&Action> for Action {
	fn from(action: &Action) -> Self {
		action.clone()
	}
}

impl From<Action> for String {
	fn from(action: Action) -> Self {
		match action {
			Action::Manage => MANAGE.to_string(),
			Action::Named(name) => name.0,
		}
	}
}

/// One action or a sequence of actions, as accepted by
/// [`Rule::is_relevant`](crate::Rule::is_relevant).
///
/// Scalars (`"read"`, `String`, [`Action`]) count as one-element sequences.
pub trait IntoActions {
	fn into_actions(self) -> Vec<Action>;
}

impl IntoActions for Action {
	fn into_actions(self) -> Vec<Action> {
		vec![self]
	}
}

impl IntoActions for &Action {
	fn into_actions(self) -> Vec<Action> {
		vec![self.clone()]
	}
}

impl IntoActions for &str {
	fn into_actions(self) -> Vec<Action> {
		vec![Action::new(self)]
	}
}

impl IntoActions for String {
	fn into_actions(self) -> Vec<Action> {
		vec![Action::new(self)]
	}
}

impl<T: Into<Action>> IntoActions for Vec<T> {
	fn into_actions(self) -> Vec<Action> {
		self.into_iter().map(Into::into).collect()
	}
}

impl<T: Into<Action>, const N: usize> IntoActions for [T; N] {
	fn into_actions(self) -> Vec<Action> {
		self.into_iter().map(Into::into).collect()
	}
}

impl<T: Into<Action> + Clone> IntoActions for &[T] {
	fn into_actions(self) -> Vec<Action> {
		self.iter().cloned().map(Into::into).collect()
	}
}
