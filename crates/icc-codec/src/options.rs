//! Profile access options

use crate::icc::TextEncoding;

/// What to do when a re-encoded payload does not fill its tag slot exactly
///
/// The directory is never rewritten, so a payload may not grow past the
/// slot recorded for its tag under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPolicy {
    /// Shorter payloads are zero-filled to the slot size
    #[default]
    PadToSlot,
    /// The payload must be exactly the slot size
    Exact,
}

/// Options for opening and editing a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileOptions {
    /// Slot size handling for `write_tag`
    pub slot_policy: SlotPolicy,
    /// Encoding used to decode 'text' payloads
    pub text_encoding: TextEncoding,
}

impl ProfileOptions {
    pub fn with_slot_policy(mut self, slot_policy: SlotPolicy) -> Self {
        self.slot_policy = slot_policy;
        self
    }

    pub fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = text_encoding;
        self
    }
}
