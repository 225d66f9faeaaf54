use thiserror::Error;

#[derive(Error, Debug)]
pub enum TracerError {
    #[error("capacity exceeded for {kind}: requested {requested}, capacity is {capacity}")]
    CapacityExceeded {
        kind: String,
        requested: usize,
        capacity: usize,
    },
    #[error("malformed asset: {what}")]
    MalformedAsset {
        what: String,
    },
    #[error("device resource failure: {what}")]
    DeviceResourceFailure {
        what: String,
    },
    #[error("argument mismatch: {what}")]
    ArgumentMismatch {
        what: String,
    },
    #[error("configuration problem: {what}")]
    Configuration {
        what: String,
    },
    #[error("io problem: {0}")]
    Io(#[from] std::io::Error),
}

impl TracerError {
    #[must_use]
    pub(crate) fn capacity_exceeded(kind: impl Into<String>, requested: usize, capacity: usize) -> Self {
        TracerError::CapacityExceeded { kind: kind.into(), requested, capacity }
    }

    #[must_use]
    pub(crate) fn device(what: impl Into<String>) -> Self {
        TracerError::DeviceResourceFailure { what: what.into() }
    }

    #[must_use]
    pub(crate) fn mismatch(what: impl Into<String>) -> Self {
        TracerError::ArgumentMismatch { what: what.into() }
    }

    #[must_use]
    pub(crate) fn configuration(what: impl Into<String>) -> Self {
        TracerError::Configuration { what: what.into() }
    }

    #[must_use]
    pub(crate) fn malformed(what: impl Into<String>) -> Self {
        TracerError::MalformedAsset { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_exceeded_message() {
        let system_under_test = TracerError::capacity_exceeded("spheres", 101, 100);
        assert_eq!(system_under_test.to_string(), "capacity exceeded for spheres: requested 101, capacity is 100");
    }

    #[test]
    fn test_io_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let system_under_test: TracerError = io_error.into();
        assert!(matches!(system_under_test, TracerError::Io(_)));
    }
}
