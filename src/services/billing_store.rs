use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::SubscriptionRecord;

/// Both directions of the user <-> customer link, kept under one lock so
/// they never disagree.
#[derive(Default)]
struct CustomerIndex {
    by_user: HashMap<String, String>,
    by_customer: HashMap<String, String>,
}

/// In-memory record of provider customers and subscriptions, keyed by our
/// user id. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct BillingStore {
    subscriptions: Arc<Mutex<HashMap<String, SubscriptionRecord>>>,
    customers: Arc<Mutex<CustomerIndex>>,
}

impl BillingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_for(&self, user_id: &str) -> Option<String> {
        self.customers.lock().unwrap().by_user.get(user_id).cloned()
    }

    /// Link a user and a customer. A customer belongs to the user it was
    /// most recently remembered for.
    pub fn remember_customer(&self, user_id: &str, customer_id: &str) {
        let mut index = self.customers.lock().unwrap();
        if let Some(previous) = index
            .by_user
            .insert(user_id.to_string(), customer_id.to_string())
        {
            let owned_by_user =
                index.by_customer.get(&previous).map(String::as_str) == Some(user_id);
            if previous != customer_id && owned_by_user {
                index.by_customer.remove(&previous);
            }
        }
        index
            .by_customer
            .insert(customer_id.to_string(), user_id.to_string());
    }

    pub fn user_for_customer(&self, customer_id: &str) -> Option<String> {
        self.customers.lock().unwrap().by_customer.get(customer_id).cloned()
    }

    pub fn subscription(&self, user_id: &str) -> Option<SubscriptionRecord> {
        self.subscriptions.lock().unwrap().get(user_id).cloned()
    }

    pub fn put_subscription(&self, user_id: &str, record: SubscriptionRecord) {
        self.subscriptions
            .lock()
            .unwrap()
            .insert(user_id.to_string(), record);
    }

    /// Apply `f` to the user's record if one exists. Returns whether it did.
    pub fn update_subscription<F>(&self, user_id: &str, f: F) -> bool
    where
        F: FnOnce(&mut SubscriptionRecord),
    {
        match self.subscriptions.lock().unwrap().get_mut(user_id) {
            Some(rec) => {
                f(rec);
                true
            }
            None => false,
        }
    }
}
