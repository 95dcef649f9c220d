//! Ordered collection integration tests

mod snapshot;
