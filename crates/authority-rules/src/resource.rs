// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource types and instances.
//!
//! Rules and queries name a resource either by its type ([`ResourceType`]) or
//! by handing over a live instance implementing [`Resource`]. Both forms are
//! resolved to a [`ResourceType`] before comparison, so a rule written against
//! `"post"` matches any `Post` instance and vice versa.
//!
//! - [`ResourceMatcher`]: the owned form stored inside a rule
//! - [`ResourceRef`]: the borrowed form accepted by matching queries

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Canonical name of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	/// Returns the type name declared by a [`ResourceKind`].
	pub fn of<T: ResourceKind>() -> Self {
		Self::new(T::RESOURCE_TYPE)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ResourceType {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for ResourceType {
	fn from(name: String) -> Self {
		Self(name)
	}
}

/// A resource instance that rules and guards can inspect.
///
/// Most types should implement [`ResourceKind`] instead and pick up this
/// trait through the blanket impl. Implement `Resource` directly when the
/// runtime type is only known per instance (e.g. dynamically typed records).
pub trait Resource: Any + Send + Sync + 'static {
	/// The runtime type of this instance.
	fn resource_type(&self) -> ResourceType;

	fn as_any(&self) -> &dyn Any;
}

/// A statically typed resource with a fixed type name.
pub trait ResourceKind: Any + Send + Sync + 'static {
	const RESOURCE_TYPE: &'static str;
}

impl<T: ResourceKind> Resource for T {
	fn resource_type(&self) -> ResourceType {
		ResourceType::of::<T>()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl dyn Resource {
	/// Returns true if the instance is a `T`.
	pub fn is<T: Resource>(&self) -> bool {
		self.as_any().is::<T>()
	}

	/// Downcasts the instance to a concrete `T`.
	pub fn downcast_ref<T: Resource>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}
}

impl fmt::Debug for dyn Resource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Resource")
			.field(&self.resource_type())
			.finish()
	}
}

/// The resource a rule governs: a type, or an instance standing in for its type.
#[derive(Debug, Clone)]
pub enum ResourceMatcher {
	Type(ResourceType),
	Instance(Arc<dyn Resource>),
}

impl ResourceMatcher {
	/// Wraps a resource instance.
	pub fn instance<T: Resource>(resource: T) -> Self {
		Self::Instance(Arc::new(resource))
	}

	/// Resolves to a type name; instances resolve to their runtime type.
	pub fn resource_type(&self) -> ResourceType {
		match self {
			Self::Type(resource_type) => resource_type.clone(),
			Self::Instance(resource) => resource.resource_type(),
		}
	}
}

impl From<ResourceType> for ResourceMatcher {
	fn from(resource_type: ResourceType) -> Self {
		Self::Type(resource_type)
	}
}

impl From<&str> for ResourceMatcher {
	fn from(name: &str) -> Self {
		Self::Type(ResourceType::new(name))
	}
}

impl From<String> for ResourceMatcher {
	fn from(name: String) -> Self {
		Self::Type(ResourceType::from(name))
	}
}

impl From<Arc<dyn Resource>> for ResourceMatcher {
	fn from(resource: Arc<dyn Resource>) -> Self {
		Self::Instance(resource)
	}
}

/// A borrowed resource query: a type name or an instance.
#[derive(Debug, Clone)]
pub enum ResourceRef<'a> {
	Type(ResourceType),
	Instance(&'a dyn Resource),
}

impl ResourceRef<'_> {
	pub fn resource_type(&self) -> ResourceType {
		match self {
			Self::Type(resource_type) => resource_type.clone(),
			Self::Instance(resource) => resource.resource_type(),
		}
	}
}

impl From<&str> for ResourceRef<'_> {
	fn from(name: &str) -> Self {
		Self::Type(ResourceType::new(name))
	}
}

impl From<String> for ResourceRef<'_> {
	fn from(name: String) -> Self {
		Self::Type(ResourceType::from(name))
	}
}

impl From<ResourceType> for ResourceRef<'_> {
	fn from(resource_type: ResourceType) -> Self {
		Self::Type(resource_type)
	}
}

impl From<&ResourceType> for ResourceRef<'_> {
	fn from(resource_type: &ResourceType) -> Self {
		Self::Type(resource_type.clone())
	}
}

impl<'a> From<&'a dyn Resource> for ResourceRef<'a> {
	fn from(resource: &'a dyn Resource) -> Self {
		Self::Instance(resource)
	}
}

impl<'a, T: Resource> From<&'a T> for ResourceRef<'a> {
	fn from(resource: &'a T) -> Self {
		Self::Instance(resource)
	}
}

impl<'a> From<&'a ResourceMatcher> for ResourceRef<'a> {
	fn from(matcher: &'a ResourceMatcher) -> Self {
		match matcher {
			ResourceMatcher::Type(resource_type) => Self::Type(resource_type.clone()),
			ResourceMatcher::Instance(resource) => Self::Instance(resource.as_ref()),
		}
	}
}
