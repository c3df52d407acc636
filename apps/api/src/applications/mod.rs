// Job application intake: multipart parsing into temp files, then upload to
// object storage and insert.

pub mod multipart;
pub mod workflow;
