//! Type-directed decoding of parsed property-list documents.

/// Document tree, destination handles, and the decode engine.
pub mod plist;
