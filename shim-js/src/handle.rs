use core::fmt;

/// A raw slot word, matching the embedding API's `internal::Address`.
pub type Address = usize;

/// An opaque, pointer-sized reference to a value owned by the underlying engine.
///
/// The shim never owns, dereferences, or validates a `Handle`; it only copies the word into the
/// slots the embedding API reads. Keeping the referenced value alive is the caller's job.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Handle(Address);

impl Handle {
  /// The all-zero word. The embedding API never hands this out for a live value.
  pub const NULL: Handle = Handle(0);

  #[inline]
  pub const fn from_address(address: Address) -> Self {
    Self(address)
  }

  #[inline]
  pub fn from_ptr<T>(ptr: *const T) -> Self {
    Self(ptr as Address)
  }

  #[inline]
  pub const fn address(self) -> Address {
    self.0
  }

  #[inline]
  pub fn as_ptr<T>(self) -> *const T {
    self.0 as *const T
  }

  #[inline]
  pub const fn is_null(self) -> bool {
    self.0 == 0
  }
}

impl fmt::Debug for Handle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Handle({:#x})", self.0)
  }
}

/// An opaque reference to the isolate (engine instance + context) a call runs in.
///
/// Stored into the call record by reinterpretation, never wrapped.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct IsolateHandle(Address);

impl IsolateHandle {
  #[inline]
  pub const fn from_address(address: Address) -> Self {
    Self(address)
  }

  #[inline]
  pub fn from_ptr<T>(ptr: *const T) -> Self {
    Self(ptr as Address)
  }

  #[inline]
  pub const fn address(self) -> Address {
    self.0
  }
}

impl fmt::Debug for IsolateHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "IsolateHandle({:#x})", self.0)
  }
}

/// The "wrap a value" factory of the underlying engine.
///
/// Converts a reference to an engine-native value into the handle form the embedding API reads.
/// Implementations typically allocate a wrapper in a handle scope owned by the engine; the shim
/// never frees what `wrap` returns.
pub trait HandleFactory {
  /// The engine's native value reference.
  type Value;

  fn wrap(&mut self, value: &Self::Value) -> Handle;
}

impl<F: HandleFactory + ?Sized> HandleFactory for &mut F {
  type Value = F::Value;

  #[inline]
  fn wrap(&mut self, value: &Self::Value) -> Handle {
    (**self).wrap(value)
  }
}
