//! Session/Context Binder
//!
//! Maps an opaque session token to "the order this terminal last
//! viewed", so tap-heavy commands (add item, pay, switch table) can
//! omit the order id. The lifecycle engine itself always takes the
//! order id explicitly — the binder is consulted only at the API
//! boundary, and a command that carries an explicit id wins over the
//! binding.

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct SessionBinder {
    bindings: DashMap<String, i64>,
}

impl SessionBinder {
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
        }
    }

    /// Remember `order_id` as the active order for this token.
    pub fn bind_active_order(&self, token: &str, order_id: i64) {
        self.bindings.insert(token.to_string(), order_id);
    }

    /// The order this token last viewed, if any.
    pub fn get_active_order(&self, token: &str) -> Option<i64> {
        self.bindings.get(token).map(|entry| *entry)
    }

    /// Forget the binding (dashboard view, end of service).
    pub fn clear_active_order(&self, token: &str) {
        self.bindings.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_get_clear_roundtrip() {
        let binder = SessionBinder::new();
        assert_eq!(binder.get_active_order("term-1"), None);

        binder.bind_active_order("term-1", 42);
        assert_eq!(binder.get_active_order("term-1"), Some(42));

        // Rebinding overwrites; tokens are independent.
        binder.bind_active_order("term-1", 43);
        binder.bind_active_order("term-2", 99);
        assert_eq!(binder.get_active_order("term-1"), Some(43));
        assert_eq!(binder.get_active_order("term-2"), Some(99));

        binder.clear_active_order("term-1");
        assert_eq!(binder.get_active_order("term-1"), None);
        assert_eq!(binder.get_active_order("term-2"), Some(99));
    }
}
