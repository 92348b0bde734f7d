//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use connector_config::codec::{CodecError, PasswordCodec};
use connector_config::lifecycle::FormSession;
use connector_config::model::InMemoryModel;
use connector_config::Settings;

/// Stored configuration from the end-to-end scenario.
pub const STORED: &str = "<configuration><server><password>Zm9v</password></server></configuration>";

/// Codec with fixed answers, counting every call.
#[derive(Debug, Default)]
pub struct TableCodec {
    pub calls: AtomicUsize,
}

impl PasswordCodec for TableCodec {
    fn name(&self) -> &'static str {
        "table"
    }

    fn encode(&self, plaintext: &str) -> Result<String, CodecError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match plaintext {
            "foo" => Ok("Zm9v".to_string()),
            "" => Ok(String::new()),
            other => Err(CodecError::Rejected(format!("no entry for {} chars", other.len()))),
        }
    }

    fn decode(&self, encoded: &str) -> Result<String, CodecError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match encoded {
            "Zm9v" => Ok("foo".to_string()),
            "" => Ok(String::new()),
            other => Err(CodecError::Rejected(format!("no entry for {} chars", other.len()))),
        }
    }
}

/// Open a session over a fresh model with the given codec.
#[allow(dead_code)]
pub fn open_session(
    settings: Settings,
    codec: Arc<dyn PasswordCodec>,
) -> (FormSession, Arc<InMemoryModel>) {
    let model = Arc::new(InMemoryModel::new());
    let session = FormSession::open(settings, codec, model.clone()).unwrap();
    (session, model)
}
