// ATS: resume-to-job compatibility scoring.
// `text` and `scorer` are pure; `handlers` and `evaluations` own I/O.

pub mod evaluations;
pub mod extract;
pub mod handlers;
pub mod policy;
pub mod scorer;
pub mod text;
