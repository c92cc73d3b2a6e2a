//! Music upload.

use serde::{Deserialize, Serialize};

/// Reply to `POST /upload`: stored names, in the order the parts arrived
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[allow(missing_docs)]
    pub files: Vec<String>,
}
