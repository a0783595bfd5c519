//! Low-level pieces of a JavaScript engine embedding shim.
//!
//! The shim lets code written against one engine's embedding API run on a different engine.
//! Most of that API is thin forwarding; this crate holds the two parts that are not:
//!
//! - [`CallArgs`]/[`FunctionCallbackInfo`]: the call record native callbacks read, built from the
//!   underlying engine's values in the exact memory layout the embedding API expects.
//! - [`strip_comments_into`] and the UTF-8 converters: loading source text into the engine's
//!   narrow (Latin-1) or wide (UTF-16) strings, optionally without comments.
//!
//! # Trust boundary
//!
//! Neither component validates handles. [`Handle`] and [`IsolateHandle`] are copied as raw words;
//! passing a dangling handle is not detected here. See [`call_info`] for the layout contract.

pub mod call_info;
pub mod char;
pub mod encoding;
mod error;
pub mod handle;
pub mod source;
pub mod strip;
pub mod utf8;
pub mod util;

pub use crate::call_info::ArgsLayout;
pub use crate::call_info::CallArgs;
pub use crate::call_info::FunctionCallbackInfo;
pub use crate::call_info::CALL_INFO_LAYOUT_VERSION;
pub use crate::encoding::Decode;
pub use crate::encoding::Latin1;
pub use crate::encoding::Sink;
pub use crate::encoding::Utf8;
pub use crate::error::ShimError;
pub use crate::error::ShimResult;
pub use crate::handle::Address;
pub use crate::handle::Handle;
pub use crate::handle::HandleFactory;
pub use crate::handle::IsolateHandle;
pub use crate::source::LoadOptions;
pub use crate::source::SourceString;
pub use crate::source::TargetEncoding;
pub use crate::strip::strip_comments_into;
pub use crate::strip::strip_comments_latin1;
pub use crate::strip::BlockCommentNewlines;
pub use crate::strip::StripOptions;
pub use crate::utf8::convert_utf8_to_latin1;
pub use crate::utf8::convert_utf8_to_utf16;
pub use crate::util::str_split;
