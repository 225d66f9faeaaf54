pub(crate) mod recording_backend;
