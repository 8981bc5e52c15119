//! Builders shared by the unit tests: PE images, metadata roots and type models.

pub mod pe;
