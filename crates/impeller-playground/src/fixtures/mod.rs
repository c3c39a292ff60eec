//! Test fixtures.
//!
//! Fixtures are static assets loaded by name. [`FixtureSource`] resolves a name
//! to bytes; the texture loader decodes image fixtures into RGBA8 textures.

mod source;
mod texture;

pub use source::{FixtureDirectory, FixtureSource, FIXTURES_DIR_ENV};
pub use texture::{
    decode_fixture, fixture_texture_descriptor, load_fixture_texture, FixtureError,
    FIXTURE_TEXTURE_FORMAT,
};
