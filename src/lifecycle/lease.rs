//! Scoped codec acquisition.

use std::sync::Arc;

use crate::codec::PasswordCodec;

/// Holds the password codec for the lifetime of a form session.
///
/// Attaching and detaching are logged; dropping the lease detaches.
#[derive(Debug)]
pub struct CodecLease {
    codec: Arc<dyn PasswordCodec>,
}

impl CodecLease {
    pub fn acquire(codec: Arc<dyn PasswordCodec>) -> Self {
        tracing::debug!(codec = codec.name(), "Password codec attached");
        Self { codec }
    }

    pub fn codec(&self) -> &dyn PasswordCodec {
        self.codec.as_ref()
    }
}

impl Drop for CodecLease {
    fn drop(&mut self) {
        tracing::debug!(codec = self.codec.name(), "Password codec detached");
    }
}
