//! Unit tests for the client task state.
