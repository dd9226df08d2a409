//! Partial updates driven by RFC 6902 JSON Patch documents.
//!
//! A patch is never applied to a whole entity. Callers hand over the entity's
//! patchable projection (for example [`UserPatch`](super::UserPatch)); the
//! document is applied to that projection's JSON form and the result is
//! decoded strictly back into the projection type, so fields outside the
//! whitelist can neither be reached nor introduced.

use json_patch::Patch;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::Error;

/// Decoded JSON Patch document.
#[derive(Debug, Clone)]
pub struct PatchDocument(Patch);

impl PatchDocument {
    /// Decode a JSON value into a list of patch operations.
    ///
    /// # Examples
    /// ```
    /// use lang_learn::domain::PatchDocument;
    /// use serde_json::json;
    ///
    /// let doc = PatchDocument::decode(json!([
    ///     { "op": "replace", "path": "/title", "value": "Basics" }
    /// ]));
    /// assert!(doc.is_ok());
    /// ```
    pub fn decode(raw: Value) -> Result<Self, Error> {
        serde_json::from_value::<Patch>(raw)
            .map(Self)
            .map_err(|err| Error::invalid_input("patch could not be decoded").with_cause(err))
    }
}

/// Result of applying a patch to a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome<P> {
    /// The patched projection equals the current one.
    Unchanged,
    /// The patched projection differs and should be merged and persisted.
    Patched(P),
}

/// Apply `doc` to `current` and decode the result back into `P`.
///
/// Errors:
/// - serializing the projection or applying an operation fails: `SystemError`;
/// - the patched document no longer fits `P`: `InvalidInput`.
pub fn apply_patch<P>(current: &P, doc: &PatchDocument) -> Result<PatchOutcome<P>, Error>
where
    P: Serialize + DeserializeOwned + PartialEq,
{
    let mut target = serde_json::to_value(current)
        .map_err(|err| Error::system("failed to marshal existing attributes").with_cause(err))?;

    json_patch::patch(&mut target, &doc.0.0)
        .map_err(|err| Error::system("failed to apply patch").with_cause(err))?;

    let patched: P = serde_json::from_value(target).map_err(|err| {
        Error::invalid_input("patched document does not match the patchable attributes")
            .with_cause(err)
    })?;

    if &patched == current {
        Ok(PatchOutcome::Unchanged)
    } else {
        Ok(PatchOutcome::Patched(patched))
    }
}
