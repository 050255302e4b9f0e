//! LocalStorage 凭据存储
//!
//! 令牌以原始字符串保存（不经 JSON 编码），与既有数据兼容。

use catalogo::CredentialStore;
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone)]
pub struct BrowserStorage {
    key: String,
}

impl BrowserStorage {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl CredentialStore for BrowserStorage {
    fn load(&self) -> Option<String> {
        LocalStorage::raw().get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) {
        if LocalStorage::raw().set_item(&self.key, token).is_err() {
            log::error!("failed to persist session token");
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}
