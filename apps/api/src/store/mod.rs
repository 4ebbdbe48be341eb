pub mod jobs;
pub mod resumes;
