// Job postings: creation, lookup and search.
// The ATS handlers read postings through `store::get_job`.

pub mod handlers;
pub mod store;
