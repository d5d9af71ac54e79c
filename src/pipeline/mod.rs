// Pipelines that move quiz attempts into the performance store.

pub mod record;
