//! Subscription plans slice.

use crate::models::Plan;

#[derive(Debug, Clone, PartialEq)]
pub enum PlansAction {
    FetchPending,
    FetchFulfilled(Vec<Plan>),
    FetchRejected(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlansSlice {
    pub plans: Vec<Plan>,
    pub loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

impl PlansSlice {
    pub fn reduce(&mut self, action: PlansAction) {
        match action {
            PlansAction::FetchPending => {
                self.loading = true;
                self.error = None;
            }
            PlansAction::FetchFulfilled(plans) => {
                self.loading = false;
                self.plans = plans;
                self.revision += 1;
            }
            PlansAction::FetchRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}
