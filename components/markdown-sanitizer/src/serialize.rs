//! Serialization of a filtered fragment back to HTML text

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use markup5ever_rcdom::{Handle, SerializableHandle};

use crate::error::SanitizeError;

/// Serialize the children of `root`, excluding `root` itself
///
/// Text and attribute values are escaped by html5ever, so characters such as
/// `<` inside text can never reopen markup.
pub fn serialize_children(root: &Handle) -> Result<String, SanitizeError> {
    let mut buffer = Vec::new();
    let handle = SerializableHandle::from(root.clone());
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    serialize(&mut buffer, &handle, opts)?;

    String::from_utf8(buffer).map_err(|e| SanitizeError::EncodingError(e.to_string()))
}
