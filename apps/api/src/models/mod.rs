pub mod ats;
pub mod job;
