//! The function-call record handed to embedder callbacks.
//!
//! The embedding API reads a `FunctionCallbackInfo` directly: two pointers and a length, with no
//! accessor indirection on its side. This module builds that record from engine-native values.
//!
//! # Layout
//!
//! ```text
//! implicit_args ──► [ holder | isolate | rv default | rv | data | new.target ]
//!
//!                     lowest address                          values
//!                          │                                    │
//! argument block:      [ argv[n-1] | argv[n-2] | ... | argv[0] | this ]
//!                                                         ▲
//!                                                      values
//! ```
//!
//! `values` points at `argv[0]`, one slot short of the end. Argument `i` lives at `values - i` and
//! the receiver at `values + 1`. For a call with no arguments `values` lies one slot *before* the
//! block; it is never dereferenced there.
//!
//! # Trust boundary
//!
//! The bridge copies handle words and nothing else: it does not check that handles are live, that
//! they belong to `isolate`, or that `holder` is an object. Callers must guarantee this; a dangling
//! handle is only detected (if at all) by whoever dereferences it.

use crate::error::ShimError;
use crate::error::ShimResult;
use crate::handle::Address;
use crate::handle::Handle;
use crate::handle::HandleFactory;
use crate::handle::IsolateHandle;
use core::ffi::c_int;
use core::fmt;
use core::ops::Deref;
use core::ptr::NonNull;
use serde::Deserialize;
use serde::Serialize;

/// Bumped whenever any constant below or the field order of [`FunctionCallbackInfo`] changes.
pub const CALL_INFO_LAYOUT_VERSION: u32 = 1;

pub const HOLDER_INDEX: usize = 0;
pub const ISOLATE_INDEX: usize = 1;
pub const RETURN_VALUE_DEFAULT_VALUE_INDEX: usize = 2;
pub const RETURN_VALUE_INDEX: usize = 3;
pub const DATA_INDEX: usize = 4;
pub const NEW_TARGET_INDEX: usize = 5;
/// Number of slots in the implicit block.
pub const IMPLICIT_ARGS_LEN: usize = 6;

/// Order in which the embedding API expects arguments in the argument block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgsLayout {
  /// Last argument at the lowest address, receiver after `argv[0]`.
  #[default]
  Standard,
  /// The alternate ABI where arguments are laid out in declared order. Not implemented; requesting
  /// it is an error rather than a silently wrong layout.
  Reversed,
}

/// A heap block of slots, owned through its true start.
///
/// The record exposes pointers into the middle of the argument block, so the block keeps the
/// original allocation separately and frees from that.
struct SlotBlock(NonNull<[Address]>);

impl SlotBlock {
  fn new(slots: Box<[Address]>) -> Self {
    Self(NonNull::from(Box::leak(slots)))
  }

  fn start(&self) -> *mut Address {
    self.0.cast::<Address>().as_ptr()
  }

  fn len(&self) -> usize {
    self.0.len()
  }

  fn as_mut_slice(&mut self) -> &mut [Address] {
    // SAFETY: the block is uniquely owned by `self` and alive until drop.
    unsafe { self.0.as_mut() }
  }
}

impl Drop for SlotBlock {
  fn drop(&mut self) {
    // SAFETY: the pointer came from `Box::leak` in `new` and is released exactly once, here.
    drop(unsafe { Box::from_raw(self.0.as_ptr()) });
  }
}

/// The call record in the exact layout the embedding API reads.
///
/// Only [`CallArgs`] creates these, and only hands them out by reference, so the pointers inside
/// are valid for as long as a `&FunctionCallbackInfo` exists.
#[repr(C)]
pub struct FunctionCallbackInfo {
  implicit_args: *mut Address,
  values: *mut Address,
  length: c_int,
}

impl FunctionCallbackInfo {
  /// Number of arguments passed by the caller.
  #[inline]
  pub fn length(&self) -> usize {
    self.length as usize
  }

  /// The argument at `index` in declared order, or `None` past the end (the embedding API maps
  /// that to `undefined`).
  #[inline]
  pub fn get(&self, index: usize) -> Option<Handle> {
    if index >= self.length() {
      return None;
    }
    // SAFETY: `index < length`, so `values - index` is inside the argument block.
    Some(unsafe { self.get_unchecked(index) })
  }

  /// Reads argument `index` with the embedding API's raw arithmetic.
  ///
  /// # Safety
  ///
  /// `index` must be less than [`length`](Self::length).
  #[inline]
  pub unsafe fn get_unchecked(&self, index: usize) -> Handle {
    debug_assert!(index < self.length());
    Handle::from_address(self.values.wrapping_sub(index).read())
  }

  /// The receiver (`this`) of the call.
  #[inline]
  pub fn this(&self) -> Handle {
    // SAFETY: `values + 1` is the last slot of the argument block for every `length`.
    Handle::from_address(unsafe { self.values.wrapping_add(1).read() })
  }

  /// The object the callback was installed on.
  #[inline]
  pub fn holder(&self) -> Handle {
    Handle::from_address(self.implicit(HOLDER_INDEX))
  }

  #[inline]
  pub fn isolate(&self) -> IsolateHandle {
    IsolateHandle::from_address(self.implicit(ISOLATE_INDEX))
  }

  pub fn return_value(&self) -> Handle {
    Handle::from_address(self.implicit(RETURN_VALUE_INDEX))
  }

  pub fn data(&self) -> Handle {
    Handle::from_address(self.implicit(DATA_INDEX))
  }

  pub fn new_target(&self) -> Handle {
    Handle::from_address(self.implicit(NEW_TARGET_INDEX))
  }

  /// Raw pointer to hand to the embedder's callback. Valid while `self` is borrowed.
  #[inline]
  pub fn as_ptr(&self) -> *const FunctionCallbackInfo {
    self as *const FunctionCallbackInfo
  }

  /// Iterates the arguments in declared order.
  pub fn args(&self) -> impl Iterator<Item = Handle> + '_ {
    (0..self.length()).filter_map(move |index| self.get(index))
  }

  fn implicit(&self, index: usize) -> Address {
    debug_assert!(index < IMPLICIT_ARGS_LEN);
    // SAFETY: the implicit block always holds `IMPLICIT_ARGS_LEN` slots.
    unsafe { self.implicit_args.add(index).read() }
  }
}

impl fmt::Debug for FunctionCallbackInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FunctionCallbackInfo")
      .field("holder", &self.holder())
      .field("isolate", &self.isolate())
      .field("this", &self.this())
      .field("args", &self.args().collect::<Vec<_>>())
      .finish()
  }
}

/// Owns the slot blocks behind a [`FunctionCallbackInfo`] for the duration of one call.
///
/// Create one per dispatch, pass [`CallArgs::as_ptr`] (or the dereferenced record) to the
/// callback, and drop it before returning to the engine. The type is neither `Send` nor `Sync`:
/// construction and destruction happen on the dispatching thread.
pub struct CallArgs {
  info: FunctionCallbackInfo,
  implicit: SlotBlock,
  args: SlotBlock,
}

impl CallArgs {
  /// Builds the record for a call with [`ArgsLayout::Standard`].
  ///
  /// Values are wrapped in the order: each argument in declared order, then `this`, then `holder`.
  ///
  /// # Panics
  ///
  /// If `args.len()` exceeds `c_int::MAX`, which the embedding API cannot represent.
  pub fn new<F: HandleFactory>(
    factory: &mut F,
    isolate: IsolateHandle,
    holder: &F::Value,
    this: &F::Value,
    args: &[F::Value],
  ) -> CallArgs {
    let argc = args.len();
    let Ok(length) = c_int::try_from(argc) else {
      panic!("{argc} arguments do not fit the call record");
    };

    let mut values: Box<[Address]> = vec![0; argc + 1].into_boxed_slice();
    for (i, arg) in args.iter().enumerate() {
      values[argc - i - 1] = factory.wrap(arg).address();
    }
    values[argc] = factory.wrap(this).address();
    let args_block = SlotBlock::new(values);

    let mut implicit = [0; IMPLICIT_ARGS_LEN];
    implicit[HOLDER_INDEX] = factory.wrap(holder).address();
    implicit[ISOLATE_INDEX] = isolate.address();
    let implicit_block = SlotBlock::new(Box::new(implicit));

    // For `argc == 0` this is one slot before the block, hence the wrapping arithmetic.
    let values = args_block.start().wrapping_add(argc).wrapping_sub(1);
    tracing::trace!(argc, slots = args_block.len(), "built call info");

    CallArgs {
      info: FunctionCallbackInfo {
        implicit_args: implicit_block.start(),
        values,
        length,
      },
      implicit: implicit_block,
      args: args_block,
    }
  }

  /// Like [`CallArgs::new`], for an explicitly requested argument layout.
  ///
  /// Fails with [`ShimError::UnsupportedConfiguration`] for [`ArgsLayout::Reversed`] before
  /// wrapping or allocating anything.
  pub fn with_layout<F: HandleFactory>(
    layout: ArgsLayout,
    factory: &mut F,
    isolate: IsolateHandle,
    holder: &F::Value,
    this: &F::Value,
    args: &[F::Value],
  ) -> ShimResult<CallArgs> {
    match layout {
      ArgsLayout::Standard => Ok(CallArgs::new(factory, isolate, holder, this, args)),
      ArgsLayout::Reversed => Err(ShimError::UnsupportedConfiguration(
        "reversed JS argument layout is not implemented",
      )),
    }
  }

  #[inline]
  pub fn info(&self) -> &FunctionCallbackInfo {
    &self.info
  }

  /// The implicit block, for outer layers that fill the return value, data or new target slots.
  pub fn implicit_slots_mut(&mut self) -> &mut [Address] {
    self.implicit.as_mut_slice()
  }

  /// Number of slots in the argument block (`length + 1`).
  pub fn argument_block_len(&self) -> usize {
    self.args.len()
  }
}

impl Deref for CallArgs {
  type Target = FunctionCallbackInfo;

  fn deref(&self) -> &FunctionCallbackInfo {
    &self.info
  }
}

impl Drop for CallArgs {
  fn drop(&mut self) {
    tracing::trace!(argc = self.info.length(), "releasing call info");
  }
}

impl fmt::Debug for CallArgs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&self.info, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use core::mem::offset_of;
  use core::mem::size_of;

  struct Identity;

  impl HandleFactory for Identity {
    type Value = usize;

    fn wrap(&mut self, value: &usize) -> Handle {
      Handle::from_address(*value)
    }
  }

  #[test]
  fn layout_is_locked() {
    assert_eq!(CALL_INFO_LAYOUT_VERSION, 1);
    assert_eq!(
      [
        HOLDER_INDEX,
        ISOLATE_INDEX,
        RETURN_VALUE_DEFAULT_VALUE_INDEX,
        RETURN_VALUE_INDEX,
        DATA_INDEX,
        NEW_TARGET_INDEX,
        IMPLICIT_ARGS_LEN,
      ],
      [0, 1, 2, 3, 4, 5, 6]
    );
    let word = size_of::<*mut Address>();
    assert_eq!(offset_of!(FunctionCallbackInfo, implicit_args), 0);
    assert_eq!(offset_of!(FunctionCallbackInfo, values), word);
    assert_eq!(offset_of!(FunctionCallbackInfo, length), 2 * word);
  }

  #[test]
  fn values_base_sits_one_slot_short_of_the_end() {
    let call = CallArgs::new(&mut Identity, IsolateHandle::from_address(1), &2, &3, &[10, 20, 30]);
    let start = call.args.start();
    assert_eq!(call.info.values, start.wrapping_add(2));
    // SAFETY: three arguments plus the receiver.
    let block = unsafe { core::slice::from_raw_parts(start, 4) };
    assert_eq!(block, &[30, 20, 10, 3]);
  }

  #[test]
  fn empty_call_reads_receiver_from_first_slot() {
    let call = CallArgs::new(&mut Identity, IsolateHandle::from_address(1), &2, &3, &[]);
    assert_eq!(call.argument_block_len(), 1);
    assert_eq!(call.this(), Handle::from_address(3));
    assert_eq!(call.get(0), None);
  }

  #[test]
  fn unset_implicit_slots_are_zero_until_filled() {
    let mut call = CallArgs::new(&mut Identity, IsolateHandle::from_address(1), &2, &3, &[4]);
    assert!(call.return_value().is_null());
    assert!(call.data().is_null());
    assert!(call.new_target().is_null());

    call.implicit_slots_mut()[DATA_INDEX] = 0xd0;
    assert_eq!(call.data(), Handle::from_address(0xd0));
    assert_eq!(call.holder(), Handle::from_address(2));
  }
}
