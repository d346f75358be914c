use std::sync::{Arc, Mutex};

/// Destination for suggested titles: the form's name field.
pub trait NameField: Send + Sync {
    fn set_name(&self, title: &str);
}

/// Keeps the current field value in memory.
#[derive(Debug, Clone, Default)]
pub struct SharedNameField {
    value: Arc<Mutex<String>>,
}

impl SharedNameField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.value
            .lock()
            .map(|value| value.clone())
            .unwrap_or_default()
    }
}

impl NameField for SharedNameField {
    fn set_name(&self, title: &str) {
        if let Ok(mut value) = self.value.lock() {
            *value = title.to_string();
        }
    }
}
