//! Asset name index.
//!
//! Category files hold one triple per line mapping an asset uuid to a value.
//! The `llid` file is inverted into an llid to uuid lookup; every other
//! recognized file becomes a uuid to value mapping for its category.
//! [`AssetIndex::fields`] joins the two to describe an asset by llid.

mod cache;
mod error;
mod index;
mod triple;

pub use cache::ASSET_CACHE_FORMAT;
pub use error::{AssetError, Result};
pub use index::{AssetFields, AssetIndex, TAG_CATEGORIES};
pub use triple::{Triple, TripleParser};
