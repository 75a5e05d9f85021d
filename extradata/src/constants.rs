/// The top-level mapping counts as depth 1.
pub const MAX_NESTING_DEPTH: usize = 64;
pub const MAX_ENTITY_ID_LENGTH: usize = 255;
