// Quizbridge: topic classification for quiz attempts.
//
// This is the library root. Each module corresponds to a major subsystem:
// topic detection, the performance store, and the pipeline joining them.

pub mod config;
pub mod db;
pub mod output;
pub mod pipeline;
pub mod status;
pub mod topics;
