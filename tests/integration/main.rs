//! End-to-end tests driving the full router against the in-memory store.

mod helpers;

mod accounts;
mod attachments;
mod log;
mod surface;
