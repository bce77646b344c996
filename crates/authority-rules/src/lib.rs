// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Allow/deny authorization rules with guarded conditions.
//!
//! This crate implements the evaluation model of a single authorization rule:
//!
//! - [`Rule`]: polarity (privilege or restriction), an [`Action`], a resource
//!   ([`ResourceMatcher`]) and an optional [`Guard`]
//! - [`Guard`]: a predicate over the authorization context and up to three
//!   resource instances
//! - [`RuleDefinition`]: the serde form of a rule, for configuration and audit
//!
//! Aggregating rules into a ruleset, choosing precedence between them and
//! loading resources are left to the caller.
//!
//! # Example
//!
//! ```
//! use authority_rules::{Guard, ResourceKind, Rule};
//!
//! struct Post {
//!     author_id: u64,
//! }
//!
//! impl ResourceKind for Post {
//!     const RESOURCE_TYPE: &'static str = "post";
//! }
//!
//! // Context is the id of the current user.
//! let mut rule = Rule::<u64>::privilege("edit", "post");
//! rule.when(Guard::for_type(|user_id: &u64, post: &Post| post.author_id == *user_id));
//!
//! let post = Post { author_id: 7 };
//! assert!(rule.is_relevant(["edit"], &post));
//! assert!(rule.is_allowed(&7, &[&post]).unwrap());
//! assert!(!rule.is_allowed(&8, &[&post]).unwrap());
//! ```

pub mod action;
pub mod definition;
pub mod error;
pub mod guard;
pub mod resource;
pub mod rule;

pub use action::{Action, ActionName, IntoActions, MANAGE};
pub use definition::{Effect, RuleDefinition};
pub use error::{BoxError, GuardError, Result};
pub use guard::Guard;
pub use resource::{Resource, ResourceKind, ResourceMatcher, ResourceRef, ResourceType};
pub use rule::Rule;

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	struct Item {
		id: i64,
	}

	impl ResourceKind for Item {
		const RESOURCE_TYPE: &'static str = "item";
	}

	struct Other;

	impl ResourceKind for Other {
		const RESOURCE_TYPE: &'static str = "other";
	}

	fn item_id(resource: &dyn Resource) -> i64 {
		resource
			.downcast_ref::<Item>()
			.map(|i| i.id)
			.unwrap_or_default()
	}

	// Property-based tests for polarity
	proptest! {
		#[test]
		fn privilege_and_restriction_are_complementary(behavior: bool, action in "[a-z]{1,12}") {
			let rule = Rule::<()>::new(behavior, action.as_str(), "item");
			prop_assert_eq!(rule.behavior(), behavior);
			prop_assert_eq!(rule.is_privilege(), !rule.is_restriction());
		}

		#[test]
		fn unguarded_decision_is_behavior(behavior: bool, ids in prop::collection::vec(any::<i64>(), 0..4)) {
			let rule = Rule::<()>::new(behavior, "read", "item");
			let items: Vec<Item> = ids.into_iter().map(|id| Item { id }).collect();
			let args: Vec<&dyn Resource> = items.iter().map(|i| i as &dyn Resource).collect();
			prop_assert_eq!(rule.is_allowed(&(), &args).unwrap(), behavior);
		}

		#[test]
		fn guarded_decision_is_polarity_xor_guard(behavior: bool, target: i64, id: i64) {
			let rule = Rule::<()>::new(behavior, "read", "item")
				.with_guard(Guard::unary(move |_, a| item_id(a) == target));
			let applies = id == target;
			let expected = if behavior { applies } else { !applies };
			prop_assert_eq!(rule.is_allowed(&(), &[&Item { id }]).unwrap(), expected);
		}
	}

	// Property-based tests for matching
	proptest! {
		#[test]
		fn rule_matches_its_own_action(action in "[a-z]{1,12}") {
			let rule = Rule::<()>::privilege(action.as_str(), "item");
			prop_assert!(rule.matches_action(action.as_str()));
		}

		#[test]
		fn distinct_actions_do_not_match(a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
			prop_assume!(a != b && a != MANAGE);
			let rule = Rule::<()>::privilege(a.as_str(), "item");
			prop_assert!(!rule.matches_action(b.as_str()));
		}

		#[test]
		fn rule_matches_its_displayed_action(action in "(manage|[a-z]{1,12})") {
			let rule = Rule::<()>::privilege(action.as_str(), "item");
			prop_assert!(rule.matches_action(rule.action().to_string()));
			let json = serde_json::to_string(rule.action()).unwrap();
			let restored: Action = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(&restored, rule.action());
		}

		#[test]
		fn wildcard_matches_any_action(action in "[a-z]{1,12}") {
			let rule = Rule::<()>::privilege(Action::Manage, "item");
			prop_assert!(rule.matches_action(action.as_str()));
		}

		#[test]
		fn relevance_is_resource_and_any_action(
			actions in prop::collection::vec("[a-z]{1,6}", 0..5),
			rule_action in "[a-z]{1,6}",
			use_other in any::<bool>(),
		) {
			prop_assume!(rule_action != MANAGE);
			let rule = Rule::<()>::privilege(rule_action.as_str(), "item");
			let any_action = actions.iter().any(|a| *a == rule_action);
			let relevant = if use_other {
				rule.is_relevant(actions.clone(), &Other)
			} else {
				rule.is_relevant(actions.clone(), &Item { id: 0 })
			};
			prop_assert_eq!(relevant, !use_other && any_action);
		}
	}
}
