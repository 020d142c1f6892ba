//! Ordered storage with stable handles.

use std::{
	fmt,
	hash::{Hash, Hasher},
	marker::PhantomData,
};

/// Stable handle to an element of a [`Collection<T>`].
///
/// Handles survive reordering, insertion and removal of other elements, and
/// are never reused within a collection.
pub struct Id<T> {
	raw: u32,
	_marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
	fn new(raw: u32) -> Self {
		Self {
			raw,
			_marker: PhantomData,
		}
	}
}

impl<T> Clone for Id<T> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<T> Copy for Id<T> {}
impl<T> PartialEq for Id<T> {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}
impl<T> Eq for Id<T> {}
impl<T> Hash for Id<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.raw.hash(state);
	}
}
impl<T> fmt::Debug for Id<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.raw)
	}
}

/// Insertion-ordered list of records, addressed by [`Id`].
///
/// Output order is list order, which is why this is not a map.
#[derive(Debug, Clone)]
pub struct Collection<T> {
	ids: Vec<Id<T>>,
	items: Vec<T>,
	next: u32,
}

impl<T> Default for Collection<T> {
	fn default() -> Self {
		Self {
			ids: Vec::new(),
			items: Vec::new(),
			next: 0,
		}
	}
}

impl<T> Collection<T> {
	pub fn new() -> Self {
		Self::default()
	}

	fn allocate(&mut self) -> Id<T> {
		let id = Id::new(self.next);
		self.next += 1;
		id
	}

	fn position(&self, id: Id<T>) -> Option<usize> {
		self.ids.iter().position(|i| *i == id)
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn push(&mut self, item: T) -> Id<T> {
		let id = self.allocate();
		self.ids.push(id);
		self.items.push(item);
		id
	}

	/// Insert `item` right after the element `after`.
	pub fn insert_after(&mut self, after: Id<T>, item: T) -> Option<Id<T>> {
		let pos = self.position(after)?;
		let id = self.allocate();
		self.ids.insert(pos + 1, id);
		self.items.insert(pos + 1, item);
		Some(id)
	}

	pub fn get(&self, id: Id<T>) -> Option<&T> {
		self.position(id).map(|pos| &self.items[pos])
	}

	/// Swap the element behind `id` for `item`, returning the previous value.
	pub fn replace(&mut self, id: Id<T>, item: T) -> Option<T> {
		let pos = self.position(id)?;
		Some(std::mem::replace(&mut self.items[pos], item))
	}

	pub fn remove(&mut self, id: Id<T>) -> Option<T> {
		let pos = self.position(id)?;
		self.ids.remove(pos);
		Some(self.items.remove(pos))
	}

	pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<Id<T>> {
		self.iter().find(|(_, item)| predicate(item)).map(|(id, _)| id)
	}

	pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
		self.ids.iter().copied().zip(self.items.iter())
	}

	pub fn ids(&self) -> impl Iterator<Item = Id<T>> + '_ {
		self.ids.iter().copied()
	}

	pub fn as_slice(&self) -> &[T] {
		&self.items
	}

	/// Build a new collection with every element passed through `f`.
	///
	/// Handles are preserved, so the result can replace `self` wholesale.
	pub fn map(&self, f: impl FnMut(&T) -> T) -> Self {
		Self {
			ids: self.ids.clone(),
			items: self.items.iter().map(f).collect(),
			next: self.next,
		}
	}
}

impl<T> FromIterator<T> for Collection<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut out = Self::new();
		for item in iter {
			out.push(item);
		}
		out
	}
}
