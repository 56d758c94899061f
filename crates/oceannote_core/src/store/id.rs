//! Opaque id generation.
//!
//! Ids are a short type prefix followed by a random v4 uuid in simple form.
//! Only uniqueness is load-bearing; callers must not parse them.

use crate::model::note::NoteId;
use crate::model::tag::TagId;
use uuid::Uuid;

const NOTE_ID_PREFIX: &str = "n_";
const TAG_ID_PREFIX: &str = "t_";

pub(crate) fn new_note_id() -> NoteId {
    prefixed(NOTE_ID_PREFIX)
}

pub(crate) fn new_tag_id() -> TagId {
    prefixed(TAG_ID_PREFIX)
}

fn prefixed(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}
